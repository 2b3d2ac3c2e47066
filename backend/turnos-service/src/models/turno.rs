use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// An appointment as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Turno {
    #[serde(rename = "_id", serialize_with = "serialize_object_id")]
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_fecha")]
    #[schema(value_type = Option<String>, format = DateTime, example = "2024-01-10T00:00:00.000Z")]
    pub fecha: Option<DateTime<Utc>>,
    pub nombre_cliente: String,
    pub nombre_mascota: String,
    pub servicio: String,
}

/// A candidate turno that passed boundary validation and has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NuevoTurno {
    pub fecha: Option<DateTime<Utc>>,
    pub nombre_cliente: String,
    pub nombre_mascota: String,
    pub servicio: String,
}

impl Turno {
    pub fn from_nuevo(id: ObjectId, nuevo: NuevoTurno) -> Self {
        Self {
            id,
            fecha: nuevo.fecha,
            nombre_cliente: nuevo.nombre_cliente,
            nombre_mascota: nuevo.nombre_mascota,
            servicio: nuevo.servicio,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTurnoRequest {
    /// Fecha del turno. Obligatoria salvo que el servicio se configure con
    /// `API__REQUIRE_FECHA=false`.
    #[serde(default, deserialize_with = "deserialize_fecha")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-10")]
    pub fecha: Option<DateTime<Utc>>,
    #[validate(required, length(min = 1))]
    #[schema(required = true, value_type = String, example = "Ana")]
    pub nombre_cliente: Option<String>,
    #[validate(required, length(min = 1))]
    #[schema(required = true, value_type = String, example = "Rex")]
    pub nombre_mascota: Option<String>,
    #[validate(required, length(min = 1))]
    #[schema(required = true, value_type = String, example = "vacuna")]
    pub servicio: Option<String>,
}

impl CreateTurnoRequest {
    pub fn into_nuevo(self, require_fecha: bool) -> Result<NuevoTurno, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if require_fecha && self.fecha.is_none() {
            errors.add("fecha", ValidationError::new("required"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NuevoTurno {
            fecha: self.fecha,
            nombre_cliente: self.nombre_cliente.unwrap_or_default(),
            nombre_mascota: self.nombre_mascota.unwrap_or_default(),
            servicio: self.servicio.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFechaRequest {
    /// Nueva fecha del turno. Obligatoria salvo que el servicio se configure
    /// con `API__REQUIRE_FECHA=false`, en cuyo caso omitirla borra la fecha.
    #[serde(default, deserialize_with = "deserialize_fecha")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-02-01")]
    pub fecha: Option<DateTime<Utc>>,
}

impl UpdateFechaRequest {
    /// `Ok(None)` clears the stored date; only possible when the date is optional.
    pub fn into_fecha(self, require_fecha: bool) -> Result<Option<DateTime<Utc>>, ValidationErrors> {
        if require_fecha && self.fecha.is_none() {
            let mut errors = ValidationErrors::new();
            errors.add("fecha", ValidationError::new("required"));
            return Err(errors);
        }
        Ok(self.fecha)
    }
}

/// Local date-times without an offset are taken as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a `YYYY-MM-DD` calendar date (midnight UTC), a local date-time
/// without offset (UTC) or an RFC 3339 timestamp, truncated to the
/// millisecond precision of a BSON date.
pub fn parse_fecha(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(truncate_to_millis(date.and_time(NaiveTime::MIN).and_utc()));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(truncate_to_millis(naive.and_utc()));
        }
    }
    let parsed = DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc);
    Ok(truncate_to_millis(parsed))
}

/// Milliseconds since the Unix epoch, as a BSON date stores them.
pub fn fecha_from_millis(millis: i64) -> DateTime<Utc> {
    mongodb::bson::DateTime::from_millis(millis).to_chrono()
}

fn truncate_to_millis(fecha: DateTime<Utc>) -> DateTime<Utc> {
    mongodb::bson::DateTime::from_chrono(fecha).to_chrono()
}

pub fn format_fecha(fecha: &DateTime<Utc>) -> String {
    fecha.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn deserialize_fecha<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFecha {
        Millis(i64),
        Text(String),
    }

    match Option::<RawFecha>::deserialize(deserializer)? {
        Some(RawFecha::Millis(millis)) => Ok(Some(fecha_from_millis(millis))),
        Some(RawFecha::Text(raw)) => parse_fecha(&raw)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid fecha {raw:?}: {e}"))),
        None => Ok(None),
    }
}

fn serialize_fecha<S>(fecha: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match fecha {
        Some(fecha) => serializer.serialize_str(&format_fecha(fecha)),
        None => serializer.serialize_none(),
    }
}

fn serialize_object_id<S>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&id.to_hex())
}
