//! Multipart form handling shared by the catalog and trip handlers
//!
//! Create/update endpoints accept `multipart/form-data` with text fields
//! plus an optional `image` part carrying the binary payload.

use axum::extract::Multipart;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::validation::parse_price;

/// Binary image payload extracted from the form
#[derive(Debug, Clone)]
pub struct FormImage {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Collected text fields and optional image of a multipart request
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, String>,
    pub image: Option<FormImage>,
}

impl FormFields {
    pub fn new(fields: HashMap<String, String>, image: Option<FormImage>) -> Self {
        Self { fields, image }
    }

    /// Drain a multipart stream into text fields plus the `image` part
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut fields = HashMap::new();
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Validation(format!("Invalid form data: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "image" {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Invalid image data: {}", e)))?
                    .to_vec();
                if !data.is_empty() {
                    image = Some(FormImage { data, content_type });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Invalid form field: {}", e)))?;
                fields.insert(name, value);
            }
        }

        Ok(Self::new(fields, image))
    }

    /// A field's value; empty strings count as missing
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// A required field's value
    pub fn require(&self, name: &str) -> Result<&str, ApiError> {
        self.text(name)
            .ok_or_else(|| ApiError::Validation(format!("{} is required", name)))
    }

    /// Optional non-negative price field
    pub fn price(&self, name: &str) -> Result<Option<f64>, ApiError> {
        self.text(name)
            .map(|v| parse_price(v).map_err(ApiError::Validation))
            .transpose()
    }

    /// Optional integer field
    pub fn integer(&self, name: &str) -> Result<Option<i32>, ApiError> {
        self.text(name)
            .map(|v| {
                v.trim()
                    .parse()
                    .map_err(|_| ApiError::Validation(format!("Invalid {}: {}", name, v)))
            })
            .transpose()
    }

    /// Optional boolean field
    pub fn boolean(&self, name: &str) -> Result<Option<bool>, ApiError> {
        self.text(name)
            .map(|v| match v.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(ApiError::Validation(format!("Invalid {}: {}", name, other))),
            })
            .transpose()
    }

    /// Optional UUID field
    pub fn uuid(&self, name: &str) -> Result<Option<Uuid>, ApiError> {
        self.text(name)
            .map(|v| {
                Uuid::parse_str(v.trim())
                    .map_err(|_| ApiError::Validation(format!("Invalid {}: {}", name, v)))
            })
            .transpose()
    }

    /// Optional comma-separated UUID list
    pub fn uuid_list(&self, name: &str) -> Result<Option<Vec<Uuid>>, ApiError> {
        self.text(name)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        Uuid::parse_str(s).map_err(|_| {
                            ApiError::Validation(format!("Invalid {}: {}", name, s))
                        })
                    })
                    .collect()
            })
            .transpose()
    }

    /// Optional comma-separated string list
    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        self.text(name).map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        let fields = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FormFields::new(fields, None)
    }

    #[test]
    fn empty_values_count_as_missing() {
        let form = form(&[("name", ""), ("location", "Goa")]);
        assert!(form.text("name").is_none());
        assert_eq!(form.text("location"), Some("Goa"));
        assert!(form.require("name").is_err());
    }

    #[test]
    fn price_is_coerced_and_checked() {
        let form = form(&[("price_per_night", "120.5"), ("bad", "-3")]);
        assert_eq!(form.price("price_per_night").unwrap(), Some(120.5));
        assert!(form.price("bad").is_err());
        assert_eq!(form.price("absent").unwrap(), None);
    }

    #[test]
    fn uuid_list_parses_comma_separated_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let value = format!("{}, {}", a, b);
        let form = form(&[("hotels", &value), ("bad", "not-a-uuid")]);

        assert_eq!(form.uuid_list("hotels").unwrap(), Some(vec![a, b]));
        assert!(form.uuid_list("bad").is_err());
        assert_eq!(form.uuid_list("absent").unwrap(), None);
    }

    #[test]
    fn string_list_splits_and_trims() {
        let form = form(&[("amenities", "wifi, pool, , spa")]);
        assert_eq!(
            form.list("amenities").unwrap(),
            vec!["wifi".to_string(), "pool".to_string(), "spa".to_string()]
        );
    }

    #[test]
    fn boolean_and_integer_fields() {
        let form = form(&[("availability", "true"), ("capacity", "3"), ("odd", "yes")]);
        assert_eq!(form.boolean("availability").unwrap(), Some(true));
        assert_eq!(form.integer("capacity").unwrap(), Some(3));
        assert!(form.boolean("odd").is_err());
    }
}
