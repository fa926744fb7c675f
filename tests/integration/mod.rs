/// Integration tests against on-disk databases and the JSON-RPC server
mod persistence_tests;
mod rpc_tests;
mod workflow_tests;
