//! Form normalization
//!
//! Turns a raw form submission into a [`ChangeRequest`]. Pure: the same form always
//! yields the same request.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::{
    ChangeRequest, ConfigForm, ConfigSection, FieldValue, FormInput, InputKind, MASK_PLACEHOLDER,
};

/// Fixed-point scale of `latitude_i` / `longitude_i`
pub const COORDINATE_SCALE: f64 = 10_000_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("unknown configuration section `{0}`")]
    UnknownSection(String),
    #[error("channel configuration requires a channel index")]
    MissingChannelIndex,
    #[error("section `{0}` does not take a channel index")]
    UnexpectedChannelIndex(ConfigSection),
    #[error("field `{field}` expects a number, got `{value}`")]
    NotNumeric { field: String, value: String },
    #[error("field `{field}` expects decimal degrees, got `{value}`")]
    InvalidCoordinate { field: String, value: String },
    #[error("field `{field}` is out of range ({value} not within ±{limit})")]
    CoordinateOutOfRange {
        field: String,
        value: String,
        limit: u32,
    },
}

/// Normalize a submitted form into a change request
pub fn normalize(form: &ConfigForm) -> Result<ChangeRequest, NormalizeError> {
    let section: ConfigSection = form
        .section
        .parse()
        .map_err(NormalizeError::UnknownSection)?;

    let channel_index = match (section, form.channel_index) {
        (ConfigSection::Channel, None) => return Err(NormalizeError::MissingChannelIndex),
        (ConfigSection::Channel, index) => index,
        (section, Some(_)) => return Err(NormalizeError::UnexpectedChannelIndex(section)),
        (_, None) => None,
    };

    let mut fields = BTreeMap::new();
    for input in &form.inputs {
        if let Some(value) = normalize_input(input)? {
            fields.insert(input.name.clone(), value);
        }
    }

    if section == ConfigSection::Position {
        to_fixed_point(&mut fields)?;
    }

    Ok(ChangeRequest {
        section,
        channel_index,
        fields,
    })
}

fn normalize_input(input: &FormInput) -> Result<Option<FieldValue>, NormalizeError> {
    let raw = input.value.as_deref();
    let value = match input.kind {
        InputKind::Checkbox => Some(FieldValue::Bool(raw.is_some())),
        InputKind::Number => Some(parse_number(&input.name, raw.unwrap_or_default())?),
        InputKind::Select => raw.map(|value| match value.trim().parse::<i64>() {
            Ok(number) => FieldValue::Integer(number),
            Err(_) => FieldValue::Text(value.to_string()),
        }),
        // empty or masked means "keep what the device has"
        InputKind::Text | InputKind::Password => raw
            .filter(|value| !value.is_empty() && *value != MASK_PLACEHOLDER)
            .map(|value| FieldValue::Text(value.to_string())),
    };
    Ok(value)
}

/// Number inputs are integers on the device; a decimal is truncated toward zero
fn parse_number(field: &str, raw: &str) -> Result<FieldValue, NormalizeError> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<i64>() {
        return Ok(FieldValue::Integer(number));
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() && number.abs() < i64::MAX as f64 => {
            Ok(FieldValue::Integer(number.trunc() as i64))
        }
        _ => Err(NormalizeError::NotNumeric {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Replace decimal position fields by the integer fields the radio stores
fn to_fixed_point(fields: &mut BTreeMap<String, FieldValue>) -> Result<(), NormalizeError> {
    for (source, target, limit) in [
        ("fixed_latitude", "latitude_i", 90),
        ("fixed_longitude", "longitude_i", 180),
    ] {
        if let Some(value) = fields.remove(source) {
            let degrees = decimal(source, &value)?;
            if degrees.abs() > f64::from(limit) {
                return Err(NormalizeError::CoordinateOutOfRange {
                    field: source.to_string(),
                    value: degrees.to_string(),
                    limit,
                });
            }
            fields.insert(target.to_string(), FieldValue::Integer(scale(degrees)));
        }
    }

    if let Some(value) = fields.remove("fixed_altitude") {
        let meters = match value {
            FieldValue::Integer(meters) => meters,
            other => decimal("fixed_altitude", &other)?.trunc() as i64,
        };
        fields.insert("altitude".to_string(), FieldValue::Integer(meters));
    }

    Ok(())
}

fn decimal(field: &str, value: &FieldValue) -> Result<f64, NormalizeError> {
    let invalid = |value: String| NormalizeError::InvalidCoordinate {
        field: field.to_string(),
        value,
    };
    match value {
        FieldValue::Integer(i) => Ok(*i as f64),
        FieldValue::Text(text) => match text.trim().parse::<f64>() {
            Ok(degrees) if degrees.is_finite() => Ok(degrees),
            _ => Err(invalid(text.clone())),
        },
        FieldValue::Bool(b) => Err(invalid(b.to_string())),
    }
}

/// Degrees to 1e-7 fixed point; ties round toward positive infinity
fn scale(degrees: f64) -> i64 {
    (degrees * COORDINATE_SCALE + 0.5).floor() as i64
}
