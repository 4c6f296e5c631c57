//! Request payloads sent by the POST scenarios

use serde::Serialize;

/// Body of `POST /api/contact`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactMessageRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessageRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// The literal submitted by the contact-creation scenario
    pub fn sample() -> Self {
        Self::new(
            "João Silva",
            "joao@example.com",
            "Olá, gostaria de saber mais sobre os vossos serviços de desenvolvimento web.",
        )
    }
}

/// Body of `POST /api/status`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusCheckRequest {
    pub client_name: String,
}

impl StatusCheckRequest {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }

    pub fn sample() -> Self {
        Self::new("Test Client")
    }
}
