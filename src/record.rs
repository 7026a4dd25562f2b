//! Candidate records and the loosely-typed values they carry.
//!
//! A [`Record`] names every field the front-end knows about and keeps anything
//! else in [`Record::extra`], so documents written by other tools survive a
//! load/save cycle with their unknown keys intact.

use crate::classify::Classification;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Value written into `Prediccion_IA` when a record is first registered.
pub const PENDING_PREDICTION: &str = "Por calcular";

/// A single field value.
///
/// Documents in the wild mix numbers and strings freely (`"Edad": "25"` next to
/// `"Edad": 25`), so values are kept as found instead of being coerced.
/// Rewriting a record must give back what was read, so `null` and integers
/// beyond `i64` have variants of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    /// Explicit JSON `null`.
    Null,
    /// Whole number.
    Integer(i64),
    /// Whole number above `i64::MAX`.
    Unsigned(u64),
    /// Number with a fractional part.
    Decimal(f64),
    /// Free text.
    Text(String),
    /// Booleans, arrays, objects: passed through untouched.
    Other(Value),
}

impl Field {
    /// The value as an exact integer, if it is one. `3.0` counts, `"3"` doesn't.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Integer(n) => Some(*n),
            Field::Unsigned(n) => i64::try_from(*n).ok(),
            Field::Decimal(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
            _ => None,
        }
    }

    /// The value read as a number. Numeric strings are parsed; anything else
    /// is `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let n = match self {
            Field::Integer(n) => Some(*n as f64),
            Field::Unsigned(n) => Some(*n as f64),
            Field::Decimal(f) => Some(*f),
            Field::Text(s) => s.trim().parse::<f64>().ok(),
            Field::Null | Field::Other(_) => None,
        };
        n.filter(|f| f.is_finite())
    }

    /// Borrow the text, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for an explicit `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    fn empty_text() -> Self {
        Field::Text(String::new())
    }
}

impl From<i64> for Field {
    fn from(n: i64) -> Self {
        Field::Integer(n)
    }
}

impl From<f64> for Field {
    fn from(f: f64) -> Self {
        Field::Decimal(f)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Text(s.to_owned())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Text(s)
    }
}

/// Present keys become `Some`, `null` included; only a missing key is `None`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Field>, D::Error> {
    Field::deserialize(deserializer).map(Some)
}

/// One candidate.
///
/// Every known field is optional: an absent field stays absent on disk and an
/// explicit `null` stays `null`. The same type doubles as the body of create
/// and update requests, where `None` means "not mentioned".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier.
    #[serde(rename = "ID", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Field>,
    /// First name.
    #[serde(rename = "Nombre", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub nombre: Option<Field>,
    /// Surnames.
    #[serde(rename = "Apellidos", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub apellidos: Option<Field>,
    /// Age in years.
    #[serde(rename = "Edad", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub edad: Option<Field>,
    /// Place of origin.
    #[serde(rename = "Procedencia", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub procedencia: Option<Field>,
    /// State.
    #[serde(rename = "Entidad Federativa", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub entidad_federativa: Option<Field>,
    /// Geographic zone.
    #[serde(rename = "Zona Geográfica", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub zona_geografica: Option<Field>,
    /// Education level.
    #[serde(rename = "Nivel Educativo", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub nivel_educativo: Option<Field>,
    /// Field of study.
    #[serde(rename = "Campo Estudio", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub campo_estudio: Option<Field>,
    /// Public / private institution.
    #[serde(rename = "Tipo Institución", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tipo_institucion: Option<Field>,
    /// Institution name.
    #[serde(rename = "Institución", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub institucion: Option<Field>,
    /// Income bracket.
    #[serde(rename = "Rango Ingreso", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub rango_ingreso: Option<Field>,
    /// Years of work experience. Drives [`Classification`].
    #[serde(rename = "Experiencia (años)", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub experiencia: Option<Field>,
    /// Full / part time.
    #[serde(rename = "Jornada", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub jornada: Option<Field>,
    /// Level.
    #[serde(rename = "Nivel", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub nivel: Option<Field>,
    /// Derived label, see [`Record::classify`].
    #[serde(rename = "Prediccion_IA", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub prediccion_ia: Option<Field>,
    /// Keys this type doesn't know about, in document order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// The record's `ID` as an integer. String or missing IDs never match.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.id.as_ref().and_then(Field::as_i64)
    }

    /// Years of experience; absent or non-numeric reads as 0.
    #[must_use]
    pub fn experience(&self) -> f64 {
        self.experiencia
            .as_ref()
            .and_then(Field::as_f64)
            .unwrap_or(0.0)
    }

    /// Build a freshly registered record from request fields.
    ///
    /// Missing or `null` text fields become `""`, missing numbers become `0`,
    /// the `ID` is always `id` and the prediction is always
    /// [`PENDING_PREDICTION`].
    #[must_use]
    pub fn registration(fields: Record, id: i64) -> Record {
        let given = |f: Option<Field>| f.filter(|v| !v.is_null());
        let text = |f: Option<Field>| given(f).or_else(|| Some(Field::empty_text()));
        let number = |f: Option<Field>| given(f).or(Some(Field::Integer(0)));
        Record {
            id: Some(Field::Integer(id)),
            nombre: text(fields.nombre),
            apellidos: text(fields.apellidos),
            edad: number(fields.edad),
            procedencia: text(fields.procedencia),
            entidad_federativa: text(fields.entidad_federativa),
            zona_geografica: text(fields.zona_geografica),
            nivel_educativo: text(fields.nivel_educativo),
            campo_estudio: text(fields.campo_estudio),
            tipo_institucion: text(fields.tipo_institucion),
            institucion: text(fields.institucion),
            rango_ingreso: text(fields.rango_ingreso),
            experiencia: number(fields.experiencia),
            jornada: text(fields.jornada),
            nivel: text(fields.nivel),
            prediccion_ia: Some(Field::from(PENDING_PREDICTION)),
            extra: fields.extra,
        }
    }

    /// Shallow-merge `patch` into this record: every field the patch mentions
    /// overwrites ours (`null` included), everything else stays.
    ///
    /// The patch's `ID` is ignored so an update can never collide with
    /// another record.
    pub fn merge(&mut self, patch: Record) {
        fn set(slot: &mut Option<Field>, value: Option<Field>) {
            if value.is_some() {
                *slot = value;
            }
        }

        set(&mut self.nombre, patch.nombre);
        set(&mut self.apellidos, patch.apellidos);
        set(&mut self.edad, patch.edad);
        set(&mut self.procedencia, patch.procedencia);
        set(&mut self.entidad_federativa, patch.entidad_federativa);
        set(&mut self.zona_geografica, patch.zona_geografica);
        set(&mut self.nivel_educativo, patch.nivel_educativo);
        set(&mut self.campo_estudio, patch.campo_estudio);
        set(&mut self.tipo_institucion, patch.tipo_institucion);
        set(&mut self.institucion, patch.institucion);
        set(&mut self.rango_ingreso, patch.rango_ingreso);
        set(&mut self.experiencia, patch.experiencia);
        set(&mut self.jornada, patch.jornada);
        set(&mut self.nivel, patch.nivel);
        set(&mut self.prediccion_ia, patch.prediccion_ia);
        self.extra.extend(patch.extra);
    }

    /// Recompute `Prediccion_IA` from experience and return the new label.
    pub fn classify(&mut self) -> Classification {
        let class = Classification::from_experience(self.experience());
        self.prediccion_ia = Some(Field::from(class.label()));
        class
    }
}
