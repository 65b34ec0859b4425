use crate::net::content_type;
use crate::net::Body;

/// Builds an `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    fields: Vec<(String, String)>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Body {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish();
        Body::with_type(encoded.into_bytes(), content_type::FORM_URLENCODED)
    }
}
