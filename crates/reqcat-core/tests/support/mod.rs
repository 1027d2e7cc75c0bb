//! Scripted in-memory backend shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqcat_core::{Backend, NetworkError};
use serde_json::{json, Value};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub endpoint: String,
    pub body: Option<Value>,
    pub token: String,
}

/// Answers GETs from a route table and records every call.
///
/// Unknown GET routes fail with 404. Writes succeed with `{"ok": true}`
/// unless a failure was scripted for them.
#[derive(Default)]
pub struct MockBackend {
    routes: Mutex<HashMap<String, Result<Value, NetworkError>>>,
    write_failures: Mutex<Vec<NetworkError>>,
    calls: Mutex<Vec<Call>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, endpoint: &str, response: Value) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Ok(response));
        self
    }

    pub fn fail_route(self, endpoint: &str, error: NetworkError) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Err(error));
        self
    }

    /// Make the next write fail.
    pub fn fail_next_write(&self, error: NetworkError) {
        self.write_failures.lock().unwrap().push(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method != "GET")
            .collect()
    }

    pub fn gets_to(&self, endpoint: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.method == "GET" && c.endpoint == endpoint)
            .count()
    }

    fn record(&self, method: &'static str, endpoint: &str, body: Option<&Value>, token: &str) {
        self.calls.lock().unwrap().push(Call {
            method,
            endpoint: endpoint.to_string(),
            body: body.cloned(),
            token: token.to_string(),
        });
    }

    fn write(&self) -> Result<Value, NetworkError> {
        match self.write_failures.lock().unwrap().pop() {
            Some(error) => Err(error),
            None => Ok(json!({ "ok": true })),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn get(&self, endpoint: &str, token: &str) -> Result<Value, NetworkError> {
        self.record("GET", endpoint, None, token);
        let route = self.routes.lock().unwrap().get(endpoint).cloned();
        let missing = || NetworkError::with_status(format!("no route {}", endpoint), 404);
        route.unwrap_or_else(|| Err(missing()))
    }

    async fn post(&self, endpoint: &str, body: &Value, token: &str) -> Result<Value, NetworkError> {
        self.record("POST", endpoint, Some(body), token);
        self.write()
    }

    async fn put(&self, endpoint: &str, body: &Value, token: &str) -> Result<Value, NetworkError> {
        self.record("PUT", endpoint, Some(body), token);
        self.write()
    }
}

/// A backend serving the standard catalogs, each in a different shape.
pub fn catalog_backend() -> MockBackend {
    MockBackend::new()
        .route(
            "prioridades",
            json!({ "prioridades": [
                { "prioridad_id": 1, "nombre": "Baja", "nivel": 1 },
                { "prioridad_id": 2, "nombre": "Media", "nivel": 2 },
                { "prioridad_id": 3, "nombre": "Alta", "nivel": 3 },
                { "prioridad_id": 5, "nombre": "Muy Alta", "nivel": 4 }
            ]}),
        )
        .route(
            "estados",
            json!({ "data": [
                { "estado_id": 10, "nombre": "Pendiente" },
                { "estado_id": 11, "nombre": "En Progreso" },
                { "estado_id": 12, "nombre": "Completado" },
                { "estado_id": 13, "nombre": "Obsoleto", "active": false }
            ]}),
        )
        .route(
            "tipos-relacion-cu",
            json!([
                { "tipo_relacion_id": 1, "nombre": "Extiende" },
                { "tipo_relacion_id": 2, "nombre": "Incluye" }
            ]),
        )
        .route(
            "unidades-estimacion",
            json!({ "unidades_estimacion": [
                { "id": 1, "nombre": "Horas" },
                { "id": 2, "nombre": "Puntos de Historia" }
            ]}),
        )
}
