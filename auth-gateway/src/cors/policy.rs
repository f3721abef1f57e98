use crate::config::{CorsConfig, OriginMode};
use crate::error::ConfigError;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

const PREFLIGHT_VARY: &str = "Origin, Access-Control-Request-Method, Access-Control-Request-Headers";

/// Compiled cross-origin policy
///
/// Built once from a [`CorsConfig`] and shared read-only by every request.
/// All header values are rendered up front, so two identical requests always
/// receive byte-identical CORS headers.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: GlobSet,
    patterns: Vec<String>,
    allow_methods: Option<HeaderValue>,
    allow_headers: Option<HeaderValue>,
    expose_headers: Option<HeaderValue>,
    allow_credentials: bool,
    max_age: Option<HeaderValue>,
    mode: OriginMode,
}

impl CorsPolicy {
    pub fn from_config(config: &CorsConfig) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.allowed_origins {
            // Origins are case-insensitive, and `*` has to span the `/` of the scheme
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .literal_separator(false)
                .build()?;
            builder.add(glob);
        }

        for method in &config.allowed_methods {
            Method::from_bytes(method.as_bytes()).map_err(|_| ConfigError::InvalidHeader {
                name: "allowed methods",
                value: method.clone(),
            })?;
        }
        for name in config
            .allowed_headers
            .iter()
            .chain(config.exposed_headers.iter())
        {
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| ConfigError::InvalidHeader {
                name: "header names",
                value: name.clone(),
            })?;
        }

        let max_age = match config.max_age_secs {
            0 => None,
            secs => Some(HeaderValue::from(secs)),
        };

        Ok(Self {
            origins: builder.build()?,
            patterns: config.allowed_origins.clone(),
            allow_methods: join_values("allowed methods", &config.allowed_methods)?,
            allow_headers: join_values("allowed headers", &config.allowed_headers)?,
            expose_headers: join_values("exposed headers", &config.exposed_headers)?,
            allow_credentials: config.allow_credentials,
            max_age,
            mode: config.origin_mode,
        })
    }

    pub fn mode(&self) -> OriginMode {
        self.mode
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether `origin` matches at least one allowed pattern
    pub fn allows(&self, origin: &HeaderValue) -> bool {
        match origin.to_str() {
            Ok(origin) => !origin.is_empty() && self.origins.is_match(origin),
            Err(_) => false,
        }
    }

    /// Headers for a preflight answer to an allowed origin.
    pub fn apply_preflight(&self, headers: &mut HeaderMap, origin: &HeaderValue) {
        headers.insert(header::VARY, HeaderValue::from_static(PREFLIGHT_VARY));
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        if let Some(methods) = &self.allow_methods {
            headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, methods.clone());
        }
        if let Some(allowed) = &self.allow_headers {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allowed.clone());
        }
        if self.allow_credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        if let Some(max_age) = &self.max_age {
            headers.insert(header::ACCESS_CONTROL_MAX_AGE, max_age.clone());
        }
    }

    /// Headers for a regular response to an allowed origin.
    pub fn apply_actual(&self, headers: &mut HeaderMap, origin: &HeaderValue) {
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        if let Some(exposed) = &self.expose_headers {
            headers.insert(header::ACCESS_CONTROL_EXPOSE_HEADERS, exposed.clone());
        }
        if self.allow_credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
    }
}

fn join_values(name: &'static str, values: &[String]) -> Result<Option<HeaderValue>, ConfigError> {
    if values.is_empty() {
        return Ok(None);
    }

    let joined = values.join(", ");
    HeaderValue::from_str(&joined)
        .map(Some)
        .map_err(|_| ConfigError::InvalidHeader {
            name,
            value: joined,
        })
}
