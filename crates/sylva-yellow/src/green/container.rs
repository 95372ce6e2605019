use text_size::TextSize;
use triomphe::Arc;

use super::{GreenBackgroundList, GreenStringLiteral, GreenValue};
use crate::spanned::{SeparatedSpannedList, SpannedList, TextLength};

/// Length of `,` and `:`.
const SEPARATOR_LEN: TextSize = TextSize::new(1);
/// Length of a bracket.
const BRACKET_LEN: TextSize = TextSize::new(1);

/// A value and the background immediately before it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenValueWithBackground {
    background_before: GreenBackgroundList,
    content: GreenValue,
}

impl GreenValueWithBackground {
    pub fn new(background_before: GreenBackgroundList, content: GreenValue) -> Self {
        Self { background_before, content }
    }

    pub fn background_before(&self) -> &GreenBackgroundList {
        &self.background_before
    }

    pub fn content(&self) -> &GreenValue {
        &self.content
    }
}

impl TextLength for GreenValueWithBackground {
    #[inline]
    fn text_len(&self) -> TextSize {
        self.background_before.text_len() + self.content.text_len()
    }
}

/// Everything between two delimiters: the effective value, any extra values
/// that follow it without a separator, and trailing background.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenMultiValue {
    value_nodes: SpannedList<Arc<GreenValueWithBackground>>,
    background_after: GreenBackgroundList,
}

impl GreenMultiValue {
    #[track_caller]
    pub fn new(
        value_nodes: impl IntoIterator<Item = Arc<GreenValueWithBackground>>,
        background_after: GreenBackgroundList,
    ) -> Self {
        let value_nodes = SpannedList::new(value_nodes);
        assert!(!value_nodes.is_empty(), "a multi-value holds at least one value");
        Self { value_nodes, background_after }
    }

    /// The effective value of this slot.
    pub fn value_node(&self) -> &GreenValueWithBackground {
        &self.value_nodes[0]
    }

    pub fn value_nodes(&self) -> &SpannedList<Arc<GreenValueWithBackground>> {
        &self.value_nodes
    }

    pub fn background_after(&self) -> &GreenBackgroundList {
        &self.background_after
    }

    /// Start of the trailing background, relative to the slot.
    pub fn background_after_offset(&self) -> TextSize {
        self.value_nodes.text_len()
    }
}

impl TextLength for GreenMultiValue {
    #[inline]
    fn text_len(&self) -> TextSize {
        self.value_nodes.text_len() + self.background_after.text_len()
    }
}

/// A map entry: colon-separated sections, the first one holding the key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenKeyValue {
    valid_key: Option<Arc<GreenStringLiteral>>,
    value_section_nodes: SeparatedSpannedList<Arc<GreenMultiValue>>,
}

impl GreenKeyValue {
    #[track_caller]
    pub fn new(
        valid_key: Option<Arc<GreenStringLiteral>>,
        value_section_nodes: impl IntoIterator<Item = Arc<GreenMultiValue>>,
    ) -> Self {
        let value_section_nodes = SeparatedSpannedList::new(value_section_nodes, SEPARATOR_LEN);
        assert!(!value_section_nodes.is_empty(), "a key-value pair holds at least a key section");
        if let Some(key) = &valid_key {
            assert!(
                matches!(
                    value_section_nodes[0].value_node().content(),
                    GreenValue::StringLiteral(literal) if literal == key
                ),
                "a valid key must be the value of the key section"
            );
        }
        Self { valid_key, value_section_nodes }
    }

    /// The key, if it is a string that does not repeat an earlier key.
    pub fn valid_key(&self) -> Option<&Arc<GreenStringLiteral>> {
        self.valid_key.as_ref()
    }

    pub fn key_node(&self) -> &GreenMultiValue {
        &self.value_section_nodes[0]
    }

    /// The section after the first colon, if there is one.
    pub fn value_node(&self) -> Option<&GreenMultiValue> {
        self.value_section_nodes.get(1).map(|section| &**section)
    }

    pub fn value_section_nodes(&self) -> &SeparatedSpannedList<Arc<GreenMultiValue>> {
        &self.value_section_nodes
    }
}

impl TextLength for GreenKeyValue {
    #[inline]
    fn text_len(&self) -> TextSize {
        self.value_section_nodes.text_len()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenMap {
    key_value_nodes: SeparatedSpannedList<Arc<GreenKeyValue>>,
    missing_curly_close: bool,
    filtered_key_value_count: usize,
}

impl GreenMap {
    #[track_caller]
    pub fn new(
        key_value_nodes: impl IntoIterator<Item = Arc<GreenKeyValue>>,
        missing_curly_close: bool,
    ) -> Self {
        let key_value_nodes = SeparatedSpannedList::new(key_value_nodes, SEPARATOR_LEN);
        assert!(!key_value_nodes.is_empty(), "a map holds at least one key-value slot");
        let filtered_key_value_count =
            key_value_nodes.iter().filter(|pair| pair.valid_key().is_some()).count();
        Self { key_value_nodes, missing_curly_close, filtered_key_value_count }
    }

    pub fn key_value_nodes(&self) -> &SeparatedSpannedList<Arc<GreenKeyValue>> {
        &self.key_value_nodes
    }

    pub fn missing_curly_close(&self) -> bool {
        self.missing_curly_close
    }

    /// Number of entries with a valid key.
    pub fn filtered_key_value_count(&self) -> usize {
        self.filtered_key_value_count
    }

    /// Iterates entries that have a valid key, with their value section.
    pub fn valid_key_values(
        &self,
    ) -> impl Iterator<Item = (&Arc<GreenStringLiteral>, Option<&GreenMultiValue>)> {
        self.key_value_nodes
            .iter()
            .filter_map(|pair| Some((pair.valid_key()?, pair.value_node())))
    }
}

impl TextLength for GreenMap {
    #[inline]
    fn text_len(&self) -> TextSize {
        let close = if self.missing_curly_close { TextSize::new(0) } else { BRACKET_LEN };
        BRACKET_LEN + self.key_value_nodes.text_len() + close
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenList {
    list_item_nodes: SeparatedSpannedList<Arc<GreenMultiValue>>,
    missing_square_bracket_close: bool,
    filtered_list_item_count: usize,
}

impl GreenList {
    #[track_caller]
    pub fn new(
        list_item_nodes: impl IntoIterator<Item = Arc<GreenMultiValue>>,
        missing_square_bracket_close: bool,
    ) -> Self {
        let list_item_nodes = SeparatedSpannedList::new(list_item_nodes, SEPARATOR_LEN);
        assert!(!list_item_nodes.is_empty(), "a list holds at least one item slot");
        let filtered_list_item_count =
            list_item_nodes.iter().filter(|item| !item.value_node().content().is_missing()).count();
        Self { list_item_nodes, missing_square_bracket_close, filtered_list_item_count }
    }

    pub fn list_item_nodes(&self) -> &SeparatedSpannedList<Arc<GreenMultiValue>> {
        &self.list_item_nodes
    }

    pub fn missing_square_bracket_close(&self) -> bool {
        self.missing_square_bracket_close
    }

    /// Number of item slots that hold an actual value.
    pub fn filtered_list_item_count(&self) -> usize {
        self.filtered_list_item_count
    }

    /// Iterates the effective values of non-empty item slots.
    pub fn filtered_items(&self) -> impl Iterator<Item = &GreenValue> {
        self.list_item_nodes
            .iter()
            .map(|item| item.value_node().content())
            .filter(|value| !value.is_missing())
    }
}

impl TextLength for GreenList {
    #[inline]
    fn text_len(&self) -> TextSize {
        let close = if self.missing_square_bracket_close { TextSize::new(0) } else { BRACKET_LEN };
        BRACKET_LEN + self.list_item_nodes.text_len() + close
    }
}
