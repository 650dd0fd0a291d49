use frontdesk_core::SlotValues;
use regex::Regex;

/// Regex-based slot filling over raw user input.
///
/// Three independent single-pass searches: item name, size token, quantity.
/// Extraction never fails; a pass that finds nothing leaves the previous
/// slot value untouched. Quantity prefers explicitly unit-suffixed numbers,
/// and digits inside a `NxM` size token are never counted as a quantity.
pub struct SlotExtractor {
    item: Regex,
    size: Regex,
    unit_quantity: Regex,
    bare_quantity: Regex,
}

impl SlotExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            item: Regex::new(r"(?i)order\s+(.+?)(?:\s+tiles?\b|$)")?,
            size: Regex::new(r"(?i)\b(\d+x\d+)\b")?,
            unit_quantity: Regex::new(r"(?i)\b(\d+)\s*(?:units|tiles|pieces)\b")?,
            bare_quantity: Regex::new(r"\b(\d+)\b")?,
        })
    }

    /// Runs all three passes over `text`, updating matched slots in place.
    pub fn apply(&self, text: &str, slots: &mut SlotValues) {
        if let Some(captures) = self.item.captures(text) {
            if let Some(name) = captures.get(1) {
                let trimmed = name.as_str().trim();
                if !trimmed.is_empty() {
                    slots.item_name = trimmed.to_string();
                }
            }
        }

        if let Some(captures) = self.size.captures(text) {
            if let Some(size) = captures.get(1) {
                slots.size = size.as_str().to_string();
            }
        }

        if let Some(quantity) = self.extract_quantity(text) {
            slots.quantity = quantity;
        }
    }

    fn extract_quantity(&self, text: &str) -> Option<u32> {
        if let Some(captures) = self.unit_quantity.captures(text) {
            if let Some(quantity) = captures.get(1).and_then(|m| m.as_str().parse().ok()) {
                return Some(quantity);
            }
        }

        // Fallback: the first bare integer, with size tokens blanked out
        // first so "15x20" can never leak into the quantity slot.
        let without_sizes = self.size.replace_all(text, " ");
        self.bare_quantity
            .captures(&without_sizes)
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use frontdesk_core::SlotValues;

    use super::SlotExtractor;

    fn extractor() -> SlotExtractor {
        SlotExtractor::new().expect("slot patterns should compile")
    }

    #[test]
    fn extracts_full_tile_name_from_order_phrase() {
        let mut slots = SlotValues::default();
        extractor().apply("I want to order Legna Castano tile", &mut slots);
        assert_eq!(slots.item_name, "Legna Castano");
    }

    #[test]
    fn order_phrase_without_tile_suffix_captures_to_end() {
        let mut slots = SlotValues::default();
        extractor().apply("order Legna Castano", &mut slots);
        assert_eq!(slots.item_name, "Legna Castano");
    }

    #[test]
    fn unit_suffixed_quantity_updates_only_quantity() {
        let mut slots = SlotValues::default();
        extractor().apply("I need 5 units", &mut slots);
        assert_eq!(slots.quantity, 5);
        assert_eq!(slots.item_name, "Unknown Tile");
        assert_eq!(slots.size, "15x20");
    }

    #[test]
    fn size_token_is_never_a_quantity() {
        let mut slots = SlotValues::default();
        extractor().apply("do you have 30x60?", &mut slots);
        assert_eq!(slots.size, "30x60");
        assert_eq!(slots.quantity, 6, "quantity should keep its previous value");
    }

    #[test]
    fn unit_suffixed_number_beats_earlier_bare_number() {
        let mut slots = SlotValues::default();
        extractor().apply("for room 12 I need 8 pieces", &mut slots);
        assert_eq!(slots.quantity, 8);
    }

    #[test]
    fn bare_integer_is_accepted_when_no_unit_is_given() {
        let mut slots = SlotValues::default();
        extractor().apply("make it 12", &mut slots);
        assert_eq!(slots.quantity, 12);
    }

    #[test]
    fn no_matches_leave_all_slots_unchanged() {
        let mut slots = SlotValues {
            item_name: "Legna Castano".to_string(),
            size: "30x60".to_string(),
            quantity: 9,
        };
        extractor().apply("where is your showroom?", &mut slots);
        assert_eq!(slots.item_name, "Legna Castano");
        assert_eq!(slots.size, "30x60");
        assert_eq!(slots.quantity, 9);
    }

    #[test]
    fn combined_phrase_updates_every_slot() {
        let mut slots = SlotValues::default();
        extractor().apply("order Pietra Grey tile, 60x60, 24 pieces", &mut slots);
        assert_eq!(slots.item_name, "Pietra Grey");
        assert_eq!(slots.size, "60x60");
        assert_eq!(slots.quantity, 24);
    }
}
