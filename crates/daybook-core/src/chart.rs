use unicode_width::UnicodeWidthStr;

/// Horizontal gridline divisions of the bar chart.
const GRID_DIVISIONS: usize = 4;

/// Share of a slot the bar occupies; the rest is inter-bar gap.
const BAR_SLOT_SHARE: f64 = 0.7;

/// Render a bar chart into a character grid.
///
/// One slot of `slot_width` columns per label; the bar fills 70% of its
/// slot. Bar height is `value / max(1, max_value)` of `height` rows, so an
/// all-zero series draws no bars rather than dividing by zero. Gridlines
/// split the chart into 4 divisions. An empty label set renders
/// `empty_text` instead.
#[must_use]
pub fn bar_chart(
    labels: &[String],
    values: &[u64],
    height: usize,
    slot_width: usize,
    empty_text: &str,
) -> String {
    if labels.is_empty() || values.is_empty() {
        return format!("{empty_text}\n");
    }

    let count = labels.len().min(values.len());
    let height = height.max(GRID_DIVISIONS) / GRID_DIVISIONS * GRID_DIVISIONS;
    let slot_width = slot_width.max(3);
    let bar_width = ((slot_width as f64 * BAR_SLOT_SHARE) as usize).max(1);
    let left_pad = (slot_width - bar_width) / 2;

    let max_value = values.iter().copied().max().unwrap_or(0).max(1);
    let bar_rows: Vec<usize> = values[..count]
        .iter()
        .map(|v| ((*v as f64 / max_value as f64) * height as f64).round() as usize)
        .collect();

    let mut out = String::new();
    for row in 0..height {
        let level = height - row;
        let on_gridline = row % (height / GRID_DIVISIONS) == 0;

        for bar_height in &bar_rows {
            for column in 0..slot_width {
                let in_bar = column >= left_pad && column < left_pad + bar_width;
                let ch = if in_bar && *bar_height >= level {
                    '█'
                } else if on_gridline {
                    '·'
                } else {
                    ' '
                };
                out.push(ch);
            }
        }
        out.push('\n');
    }

    // baseline, then centered labels
    out.push_str(&"·".repeat(slot_width * count));
    out.push('\n');
    for label in &labels[..count] {
        out.push_str(&center(label, slot_width));
    }
    out.push('\n');
    out
}

/// Render a completion gauge, the terminal version of the donut chart.
/// A total of 0 is an explicit no-data state, never an empty ring.
#[must_use]
pub fn gauge(done: usize, total: usize, width: usize) -> String {
    let width = width.max(4);
    if total == 0 {
        return format!("[{}]  no data", "·".repeat(width));
    }

    let ratio = done as f64 / total as f64;
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let percent = (ratio * 100.0).round() as u32;
    format!(
        "[{}{}]  {percent}%  {done}/{total}",
        "█".repeat(filled),
        "░".repeat(width - filled)
    )
}

fn center(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width >= width {
        return text.to_string();
    }
    let left = (width - text_width) / 2;
    let right = width - text_width - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::{bar_chart, gauge};

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn empty_series_renders_empty_text() {
        let out = bar_chart(&[], &[], 8, 5, "No completed tasks this week yet.");
        assert_eq!(out, "No completed tasks this week yet.\n");
    }

    #[test]
    fn all_zero_values_draw_no_bars() {
        let out = bar_chart(&labels(&["a", "b"]), &[0, 0], 8, 5, "empty");
        assert!(!out.contains('█'));
        assert!(out.contains("  a  "));
    }

    #[test]
    fn max_bar_reaches_the_top_row() {
        let out = bar_chart(&labels(&["a", "b"]), &[4, 2], 8, 5, "empty");
        let rows: Vec<&str> = out.lines().collect();
        // 8 chart rows + baseline + label row
        assert_eq!(rows.len(), 10);
        assert!(rows[0].contains('█'));

        let full: usize = rows
            .iter()
            .filter(|row| row.chars().nth(1) == Some('█'))
            .count();
        let half: usize = rows
            .iter()
            .filter(|row| row.chars().nth(6) == Some('█'))
            .count();
        assert_eq!(full, 8);
        assert_eq!(half, 4);
    }

    #[test]
    fn bar_occupies_seventy_percent_of_slot() {
        let out = bar_chart(&labels(&["a"]), &[1], 4, 10, "empty");
        let bottom_row = out.lines().nth(3).unwrap_or_default();
        let bar_cells = bottom_row.chars().filter(|c| *c == '█').count();
        assert_eq!(bar_cells, 7);
    }

    #[test]
    fn gauge_reports_ratio_and_counts() {
        let out = gauge(3, 5, 10);
        assert!(out.contains("60%"));
        assert!(out.contains("3/5"));
        assert_eq!(out.chars().filter(|c| *c == '█').count(), 6);
        assert_eq!(out.chars().filter(|c| *c == '░').count(), 4);
    }

    #[test]
    fn gauge_without_data_says_so() {
        let out = gauge(0, 0, 10);
        assert!(out.contains("no data"));
        assert!(!out.contains('%'));
    }
}
