//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Política para extras cuyo id no existe en la lista de precios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraPricingPolicy {
    /// Descartar la línea y continuar (comportamiento por defecto)
    Lenient,
    /// Rechazar la operación completa antes de escribir
    Strict,
}

impl ExtraPricingPolicy {
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "strict" => ExtraPricingPolicy::Strict,
            _ => ExtraPricingPolicy::Lenient,
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub extra_pricing_policy: ExtraPricingPolicy,
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            extra_pricing_policy: ExtraPricingPolicy::from_env_value(
                &env::var("EXTRA_PRICING_POLICY").unwrap_or_default(),
            ),
            default_page_size: 50,
            max_page_size: 200,
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_pricing_policy_parsing() {
        assert_eq!(ExtraPricingPolicy::from_env_value("strict"), ExtraPricingPolicy::Strict);
        assert_eq!(ExtraPricingPolicy::from_env_value("STRICT"), ExtraPricingPolicy::Strict);
        assert_eq!(ExtraPricingPolicy::from_env_value("lenient"), ExtraPricingPolicy::Lenient);
        assert_eq!(ExtraPricingPolicy::from_env_value(""), ExtraPricingPolicy::Lenient);
        assert_eq!(ExtraPricingPolicy::from_env_value("anything"), ExtraPricingPolicy::Lenient);
    }
}
