use serde::Deserialize;

use quiz_core::{ExamType, Mode};

use crate::error::ConfigError;

/// Plain configuration object mirroring the presenter's query parameters.
///
/// Defaults: mode `random`, year `2023`, type `local`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: String,
    pub category: Option<String>,
    pub exam_year: String,
    pub exam_type: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: "random".to_string(),
            category: None,
            exam_year: "2023".to_string(),
            exam_type: "local".to_string(),
        }
    }
}

impl SessionConfig {
    /// Resolve the raw parameters into a typed mode.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCategory` when mode is `category` and no
    /// slug was given, `ConfigError::UnknownExamType` for an exam type other
    /// than `local`/`national`, and `ConfigError::UnknownMode` otherwise.
    pub fn resolve(&self) -> Result<Mode, ConfigError> {
        match self.mode.as_str() {
            "random" => Ok(Mode::Random),
            "category" => {
                let slug = self
                    .category
                    .clone()
                    .filter(|s| !s.is_empty())
                    .ok_or(ConfigError::MissingCategory)?;
                Ok(Mode::Category { slug })
            }
            "exam" => {
                let exam_type = ExamType::parse(&self.exam_type)
                    .ok_or_else(|| ConfigError::UnknownExamType(self.exam_type.clone()))?;
                Ok(Mode::Exam {
                    year: self.exam_year.clone(),
                    exam_type,
                })
            }
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_random_mode() {
        assert_eq!(SessionConfig::default().resolve(), Ok(Mode::Random));
    }

    #[test]
    fn category_mode_requires_a_slug() {
        let mut config = SessionConfig {
            mode: "category".to_string(),
            ..SessionConfig::default()
        };
        assert_eq!(config.resolve(), Err(ConfigError::MissingCategory));

        config.category = Some(String::new());
        assert_eq!(config.resolve(), Err(ConfigError::MissingCategory));

        config.category = Some("redox".to_string());
        assert_eq!(
            config.resolve(),
            Ok(Mode::Category {
                slug: "redox".to_string()
            })
        );
    }

    #[test]
    fn exam_mode_resolves_year_and_type() {
        let config = SessionConfig {
            mode: "exam".to_string(),
            exam_year: "2019".to_string(),
            exam_type: "national".to_string(),
            ..SessionConfig::default()
        };
        assert_eq!(
            config.resolve(),
            Ok(Mode::Exam {
                year: "2019".to_string(),
                exam_type: ExamType::National,
            })
        );
    }

    #[test]
    fn unknown_parameters_are_rejected() {
        let config = SessionConfig {
            mode: "marathon".to_string(),
            ..SessionConfig::default()
        };
        assert_eq!(
            config.resolve(),
            Err(ConfigError::UnknownMode("marathon".to_string()))
        );

        let config = SessionConfig {
            mode: "exam".to_string(),
            exam_type: "regional".to_string(),
            ..SessionConfig::default()
        };
        assert_eq!(
            config.resolve(),
            Err(ConfigError::UnknownExamType("regional".to_string()))
        );
    }

    #[test]
    fn config_deserializes_from_query_shaped_json() {
        let config: SessionConfig = serde_json::from_str(
            r#"{"mode":"category","category":"atomic"}"#,
        )
        .unwrap();
        assert_eq!(
            config.resolve(),
            Ok(Mode::Category {
                slug: "atomic".to_string()
            })
        );
        // Omitted fields keep their defaults.
        assert_eq!(config.exam_year, "2023");
    }
}
