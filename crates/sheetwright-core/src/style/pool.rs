//! Style pool for deduplication

use super::Style;
use ahash::AHashMap;

/// Style pool for deduplicating styles
///
/// Cells reference styles by index; each distinct style is stored once.
/// Index 0 is always the default style.
#[derive(Debug)]
pub struct StylePool {
    styles: Vec<Style>,
    index_map: AHashMap<StyleKey, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StyleKey(u64);

impl StyleKey {
    fn from_style(style: &Style) -> Self {
        use std::hash::{Hash, Hasher};
        let mut hasher = ahash::AHasher::default();
        style.hash(&mut hasher);
        StyleKey(hasher.finish())
    }
}

impl StylePool {
    /// Create a new style pool with default style at index 0
    pub fn new() -> Self {
        let default = Style::default();
        let mut index_map = AHashMap::new();
        index_map.insert(StyleKey::from_style(&default), 0);

        Self {
            styles: vec![default],
            index_map,
        }
    }

    /// Get or create a style, returning its index
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        let key = StyleKey::from_style(&style);

        if let Some(&idx) = self.index_map.get(&key) {
            // Guard against hash collisions
            if self.styles.get(idx as usize) == Some(&style) {
                return idx;
            }
        }

        let idx = self.styles.len() as u32;
        self.index_map.insert(key, idx);
        self.styles.push(style);
        idx
    }

    /// Index of the style obtained by applying `edit` to the style at `base`
    ///
    /// An unknown `base` starts from the default style.
    pub fn derive<F>(&mut self, base: u32, edit: F) -> u32
    where
        F: FnOnce(&mut Style),
    {
        let mut style = self.get(base).cloned().unwrap_or_default();
        edit(&mut style);
        self.get_or_insert(style)
    }

    /// Get a style by index
    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Get the number of styles, including the default
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the pool only has the default style
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }

    /// Iterate over all styles with their indices
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Style)> {
        self.styles.iter().enumerate().map(|(i, s)| (i as u32, s))
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BorderStyle, Color, NumberFormat};

    #[test]
    fn test_default_style() {
        let pool = StylePool::new();
        assert_eq!(pool.len(), 1);
        assert!(pool.is_empty());
        assert_eq!(pool.get(0), Some(&Style::default()));
    }

    #[test]
    fn test_deduplication() {
        let mut pool = StylePool::new();

        let idx1 = pool.get_or_insert(Style::new().bold(true));
        let idx2 = pool.get_or_insert(Style::new().bold(true));
        let idx3 = pool.get_or_insert(Style::new().italic(true));

        assert_eq!(idx1, idx2);
        assert_ne!(idx1, idx3);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_derive_keeps_base_attributes() {
        let mut pool = StylePool::new();

        let header = pool.get_or_insert(Style::new().bold(true).fill_color(Color::HEADER_GRAY));
        let bordered = pool.derive(header, |s| s.border = BorderStyle::thin());

        let style = pool.get(bordered).unwrap();
        assert!(style.font.bold);
        assert_eq!(style.border, BorderStyle::thin());

        // Same edit on the same base is deduplicated
        assert_eq!(pool.derive(header, |s| s.border = BorderStyle::thin()), bordered);

        let formatted = pool.derive(99, |s| s.number_format = NumberFormat::thousands());
        assert!(!pool.get(formatted).unwrap().font.bold);
    }
}
