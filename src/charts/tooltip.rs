//! Tooltip Module
//! Formatting and visibility of the one overlay shared by all charts.

/// A data point matched by the nearest-point search.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverItem {
    /// `[x, y]` in data coordinates.
    pub datapoint: [f64; 2],
    pub series_label: String,
    /// Index of the sample within its series.
    pub index: usize,
}

/// A pointer move over a chart, in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverEvent {
    pub page_x: f64,
    pub page_y: f64,
    pub item: Option<HoverItem>,
}

/// Visible/hidden overlay with its text and page position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipState {
    visible: bool,
    position: [f64; 2],
    text: String,
}

impl TooltipState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> [f64; 2] {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Apply a hover event: show the matched point next to the pointer, or hide.
    pub fn on_hover(&mut self, event: &HoverEvent, offset: f64) {
        match &event.item {
            Some(item) => {
                self.text = format_tooltip(item.datapoint[1], &item.series_label);
                self.position = [event.page_x + offset, event.page_y + offset];
                self.visible = true;
            }
            None => self.hide(),
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.text.clear();
    }
}

/// Round half away from zero and print without decimals.
pub fn format_rounded(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        // no "-0"
        "0".to_string()
    } else {
        format!("{:.0}", rounded)
    }
}

/// `"<rounded value> <label>"`.
pub fn format_tooltip(value: f64, label: &str) -> String {
    format!("{} {}", format_rounded(value), label)
}
