//! Error taxonomy shared by the session gate, the collaborators and the view.

use thiserror::Error;

const WEAK_SECRET_MESSAGE: &str = "La contraseña debe tener: 8 caracteres, 1 mayúscula, \
     1 minúscula, 1 número y un símbolo (-_&%$#\"!=).";

/// Input rejected locally, before any store or network access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Ingresa un correo válido.")]
    InvalidIdentity,

    #[error("{}", WEAK_SECRET_MESSAGE)]
    WeakSecret,

    #[error("Escribe el nombre de una ciudad.")]
    EmptyQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("El correo no existe. Regístrate primero.")]
    UnknownIdentity,

    #[error("Contraseña incorrecta.")]
    SecretMismatch,

    #[error("Este correo ya está registrado.")]
    AlreadyRegistered,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// One entry per rejected field, identity first.
    #[error("{}", join_messages(.0))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("current position unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("city not found")]
    CityNotFound,

    #[error("weather request failed: {0}")]
    Network(String),
}

/// Why a fetch issued by the view did not produce a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    PermissionDenied,
    LocationUnavailable,
    CityNotFound,
    NetworkError,
}

impl FailureReason {
    /// Text shown in the error view.
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureReason::PermissionDenied => "Se necesita permiso de ubicación.",
            FailureReason::LocationUnavailable => "Error al obtener ubicación.",
            FailureReason::CityNotFound => "No encontramos esa ciudad.",
            FailureReason::NetworkError => "No se pudo conectar con el servicio del clima.",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.user_message())
    }
}

impl From<LocationError> for FailureReason {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => FailureReason::PermissionDenied,
            LocationError::Unavailable => FailureReason::LocationUnavailable,
        }
    }
}

impl From<FetchError> for FailureReason {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::CityNotFound => FailureReason::CityNotFound,
            FetchError::Network(_) => FailureReason::NetworkError,
        }
    }
}
