/// A menu entry. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    label: String,
    width: usize,
}

impl Button {
    /// Button exactly as wide as its label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let width = label.chars().count();
        Self { label, width }
    }

    /// Button padded to `width`. Never narrower than the label.
    pub fn with_width(label: impl Into<String>, width: usize) -> Self {
        let label = label.into();
        let width = width.max(label.chars().count());
        Self { label, width }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Label centered in a field of `width` columns.
    pub(crate) fn padded_label(&self) -> String {
        format!("{:^width$}", self.label, width = self.width)
    }
}
