/// Plain-text charts for the statistics reports

/// Glyphs from lowest to highest
pub const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const BAR_CHAR: char = '█';
const EMPTY_CHAR: char = '░';
const MIN_BAR_WIDTH: usize = 5;

/// One-line trend of a series of values
#[derive(Debug, Clone, Copy)]
pub struct Sparkline {
    pub width: usize,
}

impl Sparkline {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Render the last `width` values, scaled between the smallest and the
    /// largest value of the whole series
    pub fn render(&self, values: &[f64]) -> String {
        if values.is_empty() {
            return String::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max == min {
            max = min + 1.0;
        }

        let top = SPARK_CHARS.len() - 1;
        let start = values.len().saturating_sub(self.width);

        values[start..]
            .iter()
            .map(|v| {
                let normalized = (v - min) / (max - min);
                // truncation toward zero picks the glyph
                let idx = (normalized * top as f64) as usize;
                SPARK_CHARS[idx.min(top)]
            })
            .collect()
    }
}

/// Horizontal percentage bars
#[derive(Debug, Clone, Copy)]
pub struct BarChart {
    /// Total line width including label and percentage
    pub width: usize,
    pub max_value: f64,
}

impl BarChart {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            max_value: 100.0,
        }
    }

    /// `label █████░░░░░  50%`; an empty label drops the leading column
    pub fn render(&self, value: f64, label: &str) -> String {
        let max_value = if self.max_value > 0.0 { self.max_value } else { 100.0 };
        let ratio = (value / max_value).clamp(0.0, 1.0);

        let label_width = label.chars().count();
        let bar_width = self
            .width
            .saturating_sub(label_width + 10)
            .max(MIN_BAR_WIDTH);

        let filled = (bar_width as f64 * ratio) as usize;
        let bar: String = std::iter::repeat(BAR_CHAR)
            .take(filled)
            .chain(std::iter::repeat(EMPTY_CHAR).take(bar_width - filled))
            .collect();

        let percent = format!("{:.0}%", value);
        if label.is_empty() {
            format!("{} {:>5}", bar, percent)
        } else {
            format!("{} {} {:>5}", label, bar, percent)
        }
    }
}
