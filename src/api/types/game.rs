//! Game request payloads

use serde::Deserialize;

const MAX_NAME_LENGTH: usize = 200;

/// Body for `POST /v1/games`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
    #[serde(default)]
    pub bgg_id: Option<i64>,
    #[serde(default)]
    pub min_players: Option<i64>,
    #[serde(default)]
    pub max_players: Option<i64>,
    #[serde(default)]
    pub playtime_minutes: Option<i64>,
}

impl CreateGameRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_player_bounds(self.min_players, self.max_players)?;
        validate_positive("playtime_minutes", self.playtime_minutes)?;
        validate_positive("bgg_id", self.bgg_id)?;
        Ok(())
    }
}

/// Body for `PUT /v1/games/{id}`. Absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGameRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bgg_id: Option<i64>,
    #[serde(default)]
    pub min_players: Option<i64>,
    #[serde(default)]
    pub max_players: Option<i64>,
    #[serde(default)]
    pub playtime_minutes: Option<i64>,
}

impl UpdateGameRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_player_bounds(self.min_players, self.max_players)?;
        validate_positive("playtime_minutes", self.playtime_minutes)?;
        validate_positive("bgg_id", self.bgg_id)?;
        Ok(())
    }

    pub fn is_noop(&self) -> bool {
        self.name.is_none()
            && self.bgg_id.is_none()
            && self.min_players.is_none()
            && self.max_players.is_none()
            && self.playtime_minutes.is_none()
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(format!(
            "name must be at most {} characters",
            MAX_NAME_LENGTH
        ));
    }
    Ok(())
}

fn validate_player_bounds(min: Option<i64>, max: Option<i64>) -> Result<(), String> {
    validate_positive("min_players", min)?;
    validate_positive("max_players", max)?;
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err("min_players must not exceed max_players".to_string());
        }
    }
    Ok(())
}

fn validate_positive(field: &str, value: Option<i64>) -> Result<(), String> {
    if let Some(value) = value {
        if value < 1 {
            return Err(format!("{} must be positive", field));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_create() -> CreateGameRequest {
        CreateGameRequest {
            name: "Brass: Birmingham".to_string(),
            bgg_id: Some(224517),
            min_players: Some(2),
            max_players: Some(4),
            playtime_minutes: Some(120),
        }
    }

    #[test]
    fn test_create_valid() {
        assert!(base_create().validate().is_ok());
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut request = base_create();
        request.name = "   ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_rejects_oversized_name() {
        let mut request = base_create();
        request.name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_rejects_inverted_player_bounds() {
        let mut request = base_create();
        request.min_players = Some(5);
        request.max_players = Some(2);
        let err = request.validate().unwrap_err();
        assert!(err.contains("min_players"));
    }

    #[test]
    fn test_create_rejects_nonpositive_values() {
        let mut request = base_create();
        request.playtime_minutes = Some(0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_deserializes_with_defaults() {
        let request: CreateGameRequest =
            serde_json::from_str(r#"{"name": "Cascadia"}"#).unwrap();
        assert_eq!(request.name, "Cascadia");
        assert_eq!(request.bgg_id, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_all_absent_is_noop() {
        let request = UpdateGameRequest::default();
        assert!(request.is_noop());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_partial() {
        let request: UpdateGameRequest =
            serde_json::from_str(r#"{"playtime_minutes": 90}"#).unwrap();
        assert!(!request.is_noop());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let request: UpdateGameRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
