//! Session-aware request wrapper.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::{AUTHORIZATION, Backend, Method, Request, Response};
use crate::session::{Session, SessionData};
use crate::{Error, Result};

/// Sends requests with the session's bearer token attached.
///
/// A rejected token signs the session out, so the UI falls back to login.
pub struct Client {
    backend: Box<dyn Backend>,
    session: Session,
}

impl Client {
    pub fn new(backend: Box<dyn Backend>, session: Session) -> Self {
        Self { backend, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Generic request: path, method and optional JSON body.
    pub fn request(&mut self, method: Method, path: &str, data: Option<Value>) -> Result<Response> {
        let mut request = Request::new(method, path);
        if let Some(data) = data {
            request = request.with_data(data);
        }
        if let Some(token) = self.session.token() {
            request = request.with_header(AUTHORIZATION, format!("Bearer {}", token));
        }
        match self.backend.request(request) {
            Ok(response) => {
                debug!(%method, path, status = response.status, "request ok");
                Ok(response)
            }
            Err(err) => {
                warn!(%method, path, error = %err, "request failed");
                if err.is_unauthorized() && self.session.is_signed_in() {
                    self.session.clear();
                }
                Err(err)
            }
        }
    }

    /// Exchanges credentials for a session and stores it.
    pub fn login(&mut self, username: &str, password: &str) -> Result<SessionData> {
        let response = self.request(
            Method::Post,
            "/login",
            Some(json!({"username": username, "password": password})),
        )?;
        let data: SessionData = serde_json::from_value(response.body)?;
        self.session.set(data.clone());
        Ok(data)
    }

    pub fn logout(&mut self) {
        self.session.clear();
    }

    pub fn list<T: DeserializeOwned>(&mut self, collection: &str) -> Result<Vec<T>> {
        let response = self.request(Method::Get, &format!("/{}", collection), None)?;
        Ok(serde_json::from_value(response.body)?)
    }

    pub fn create<T: Serialize>(&mut self, collection: &str, record: &T) -> Result<Value> {
        let body = record_body(record)?;
        let response = self.request(Method::Post, &format!("/{}", collection), Some(body))?;
        Ok(response.body)
    }

    pub fn update<T: Serialize>(
        &mut self,
        collection: &str,
        id: &str,
        record: &T,
    ) -> Result<Value> {
        let body = record_body(record)?;
        let response =
            self.request(Method::Put, &format!("/{}/{}", collection, id), Some(body))?;
        Ok(response.body)
    }

    pub fn delete(&mut self, collection: &str, id: &str) -> Result<()> {
        self.request(Method::Delete, &format!("/{}/{}", collection, id), None)?;
        Ok(())
    }
}

fn record_body<T: Serialize>(record: &T) -> Result<Value> {
    match serde_json::to_value(record)? {
        body @ Value::Object(_) => Ok(body),
        other => Err(Error::BadRequest(format!("record must be an object, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Document, FileBackend, UserRecord, hash_password};
    use crate::models::{Entity, Provider};
    use crate::session::Role;

    fn client() -> Client {
        let mut document = Document::default();
        document.users.push(UserRecord {
            username: "caja".into(),
            password_hash: hash_password("caja"),
            role: Role::Staff,
        });
        document.collections.insert(
            Provider::PATH.into(),
            vec![json!({"id": 1, "name": "Bimbo", "contact": "", "phone": "", "email": ""})],
        );
        Client::new(Box::new(FileBackend::in_memory(document)), Session::new())
    }

    #[test]
    fn login_stores_session_and_token_is_attached() {
        let mut client = client();
        assert!(client.list::<Provider>(Provider::PATH).is_err());

        let data = client.login("caja", "caja").unwrap();
        assert_eq!(data.role, Role::Staff);
        assert_eq!(client.session().get(), Some(data));

        let providers: Vec<Provider> = client.list(Provider::PATH).unwrap();
        assert_eq!(providers[0].name, "Bimbo");
    }

    #[test]
    fn rejected_token_signs_out() {
        let mut client = client();
        client.login("caja", "caja").unwrap();
        // Forge a session the backend never issued.
        let mut forged = client.session().get().unwrap();
        forged.token = "deadbeef".into();
        client.session().set(forged);

        let err = client.list::<Provider>(Provider::PATH).unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!client.session().is_signed_in());
    }

    #[test]
    fn create_update_delete_through_client() {
        let mut client = client();
        client.login("caja", "caja").unwrap();

        let created = client
            .create(
                Provider::PATH,
                &Provider {
                    name: "Ledevit".into(),
                    ..Provider::default()
                },
            )
            .unwrap();
        assert_eq!(created["id"], json!(2));

        let mut edited: Provider = serde_json::from_value(created).unwrap();
        edited.phone = "011 4300-8800".into();
        client.update(Provider::PATH, "2", &edited).unwrap();

        client.delete(Provider::PATH, "1").unwrap();
        let providers: Vec<Provider> = client.list(Provider::PATH).unwrap();
        assert_eq!(providers, vec![edited]);
    }
}
