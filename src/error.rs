use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Every way a check-in attempt can fail.
///
/// The `Display` strings are the user-facing messages returned verbatim in
/// the response body, so they stay in the language of the fleet operators.
#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    #[error("ID não informado.")]
    MissingId,

    #[error("Localização inválida.")]
    InvalidLocation,

    #[error("Identificação do aparelho não informada.")]
    MissingDevice,

    #[error("Sinal de GPS fraco (precisão de {accuracy_m:.0}m). Vá para um local aberto e tente novamente.")]
    WeakSignal { accuracy_m: f64 },

    #[error("Fora do perímetro permitido (distância de {distance_km:.2} km).")]
    OutOfRange { distance_km: f64 },

    #[error("Este ID já realizou check-in hoje.")]
    AlreadyCheckedInToday,

    #[error("Este aparelho já realizou check-in hoje para o ID {other_id}.")]
    DeviceAlreadyUsed { other_id: String },

    #[error("Banco de dados indisponível: {0}")]
    PersistenceUnavailable(#[from] sqlx::Error),
}

impl CheckinError {
    /// Validation errors are the client's fault (400); policy rejections on
    /// valid input are forbidden (403); collaborator failures are 500.
    pub fn status(&self) -> StatusCode {
        match self {
            CheckinError::MissingId
            | CheckinError::InvalidLocation
            | CheckinError::MissingDevice
            | CheckinError::WeakSignal { .. } => StatusCode::BAD_REQUEST,
            CheckinError::OutOfRange { .. }
            | CheckinError::AlreadyCheckedInToday
            | CheckinError::DeviceAlreadyUsed { .. } => StatusCode::FORBIDDEN,
            CheckinError::PersistenceUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CheckinError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "check-in failed on persistence");
        }

        let mut body = json!({ "ok": false, "msg": self.to_string() });
        if let CheckinError::OutOfRange { distance_km } = &self {
            body["distance"] = json!((distance_km * 1000.0).round() / 1000.0);
        }

        (status, axum::Json(body)).into_response()
    }
}
