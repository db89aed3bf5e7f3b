use unicode_width::UnicodeWidthStr;

pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub min_card_width: f64,
    pub min_card_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            padding_x: 12.0,
            padding_y: 10.0,
            min_card_width: 120.0,
            min_card_height: 50.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Card holding a name line and an optional caption line.
    pub fn card_size(&self, name: &str, caption: Option<&str>) -> (f64, f64) {
        let content_width = self
            .text_width(name)
            .max(caption.map(|c| self.text_width(c)).unwrap_or(0.0))
            + self.padding_x * 2.0;
        let width = content_width.max(self.min_card_width);

        let lines = if caption.is_some() { 2.0 } else { 1.0 };
        let height = (lines * self.line_height + self.padding_y * 2.0).max(self.min_card_height);

        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("Kim"), 3.0 * 8.0);
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // 한글은 폭 2
        assert_eq!(m.text_width("김철수"), 6.0 * 8.0);
    }

    #[test]
    fn test_mixed_width() {
        let m = TextMetrics::default();
        // "Kim" (3) + "철수" (4) = 7
        assert_eq!(m.text_width("Kim철수"), 7.0 * 8.0);
    }

    #[test]
    fn test_short_name_uses_minimum() {
        let m = TextMetrics::default();
        assert_eq!(m.card_size("Al", None), (120.0, 50.0));
    }

    #[test]
    fn test_long_name_widens_card() {
        let m = TextMetrics::default();
        let (w, _) = m.card_size("Bartholomew Alexander Montgomery", Some("1901 - 1977"));
        assert_eq!(w, 32.0 * 8.0 + 24.0);
    }

    #[test]
    fn test_caption_adds_line() {
        let m = TextMetrics::default();
        let (_, one) = m.card_size("Kim", None);
        let (_, two) = m.card_size("Kim", Some("1950 -"));
        assert!(two > one);
    }
}
