//! JSON document store answering REST-style requests.
//!
//! Routes:
//! - `POST /login` with `{username, password}` -> `{token, username, role}`
//! - `GET /{collection}` -> array of records
//! - `POST /{collection}` -> created record with a fresh numeric `id`
//! - `GET|PUT|DELETE /{collection}/{id}`
//!
//! Everything except login needs a bearer token issued by this store.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, warn};
use xxhash_rust::xxh3::xxh3_64;

use super::{Backend, Method, Request, Response};
use crate::session::Role;
use crate::table::CellValue;
use crate::{Error, Result};

/// Stored user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// On-disk layout: user accounts plus named record collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub users: Vec<UserRecord>,
    pub collections: BTreeMap<String, Vec<Value>>,
}

/// Hex xxh3 digest used for stored passwords.
pub fn hash_password(password: &str) -> String {
    format!("{:016x}", xxh3_64(password.as_bytes()))
}

/// Local stand-in for the record service.
#[derive(Debug)]
pub struct FileBackend {
    path: Option<PathBuf>,
    document: Document,
    /// Issued tokens -> username.
    tokens: HashMap<String, String>,
    issued: u64,
}

impl FileBackend {
    /// Opens the store at `path`, seeding it with demo data when missing.
    pub fn open(path: impl AsRef<Path>, admin_password: &str) -> Result<Self> {
        let path = path.as_ref();
        let seeded = !path.exists();
        let document = if !seeded {
            let reader = BufReader::new(File::open(path)?);
            let document: Document = serde_json::from_reader(reader)?;
            info!(
                path = %path.display(),
                collections = document.collections.len(),
                "record store loaded"
            );
            document
        } else {
            info!(path = %path.display(), "record store missing, seeding demo data");
            super::demo_document(admin_password)
        };
        let backend = Self {
            path: Some(path.to_path_buf()),
            document,
            tokens: HashMap::new(),
            issued: 0,
        };
        if seeded {
            backend.save()?;
        }
        Ok(backend)
    }

    /// A store that lives only in memory.
    pub fn in_memory(document: Document) -> Self {
        Self {
            path: None,
            document,
            tokens: HashMap::new(),
            issued: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Writes the whole document atomically (temp file + rename).
    fn save(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, &self.document)?;
            writer.flush()?;
        }
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;
        debug!(path = %path.display(), "record store saved");
        Ok(())
    }

    fn login(&mut self, data: Option<&Value>) -> Result<Response> {
        #[derive(Deserialize)]
        struct Credentials {
            username: String,
            password: String,
        }
        let data = data.ok_or_else(|| Error::BadRequest("missing credentials".into()))?;
        let creds: Credentials = serde_json::from_value(data.clone())
            .map_err(|e| Error::BadRequest(e.to_string()))?;

        let hash = hash_password(&creds.password);
        let Some(user) = self
            .document
            .users
            .iter()
            .find(|u| u.username == creds.username && u.password_hash == hash)
        else {
            warn!(user = %creds.username, "login rejected");
            return Err(Error::Unauthorized("invalid username or password".into()));
        };

        self.issued += 1;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let token = format!(
            "{:016x}",
            xxh3_64(format!("{}:{}:{}", user.username, nanos, self.issued).as_bytes())
        );
        let body = json!({
            "token": token,
            "username": user.username,
            "role": user.role,
        });
        self.tokens.insert(token, user.username.clone());
        Ok(Response::ok(body))
    }

    fn authorize(&self, request: &Request) -> Result<()> {
        match request.bearer_token() {
            Some(token) if self.tokens.contains_key(token) => Ok(()),
            Some(_) => Err(Error::Unauthorized("unknown token".into())),
            None => Err(Error::Unauthorized("missing token".into())),
        }
    }

    fn collection_mut(&mut self, name: &str) -> Result<&mut Vec<Value>> {
        self.document
            .collections
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(format!("collection '{}'", name)))
    }

    fn position(records: &[Value], id: &str) -> Option<usize> {
        records.iter().position(|r| record_id(r) == id)
    }

    fn create(&mut self, collection: &str, data: Option<Value>) -> Result<Response> {
        let Some(Value::Object(mut record)) = data else {
            return Err(Error::BadRequest("record must be a JSON object".into()));
        };
        let records = self.collection_mut(collection)?;
        let next_id = records
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0)
            + 1;
        record.insert("id".into(), json!(next_id));
        let record = Value::Object(record);
        records.push(record.clone());
        self.save()?;
        info!(collection, id = next_id, "record created");
        Ok(Response::created(record))
    }

    fn update(&mut self, collection: &str, id: &str, data: Option<Value>) -> Result<Response> {
        let Some(Value::Object(mut record)) = data else {
            return Err(Error::BadRequest("record must be a JSON object".into()));
        };
        let records = self.collection_mut(collection)?;
        let index = Self::position(records, id)
            .ok_or_else(|| Error::NotFound(format!("{}/{}", collection, id)))?;
        // The path decides the id, keeping its stored JSON type.
        let stored_id = records[index].get("id").cloned().unwrap_or(Value::Null);
        record.insert("id".into(), stored_id);
        records[index] = Value::Object(record);
        let record = records[index].clone();
        self.save()?;
        info!(collection, id, "record updated");
        Ok(Response::ok(record))
    }

    fn delete(&mut self, collection: &str, id: &str) -> Result<Response> {
        let records = self.collection_mut(collection)?;
        let index = Self::position(records, id)
            .ok_or_else(|| Error::NotFound(format!("{}/{}", collection, id)))?;
        records.remove(index);
        self.save()?;
        info!(collection, id, "record deleted");
        Ok(Response::no_content())
    }
}

/// Stringified `id` field, matching how tables identify rows.
fn record_id(record: &Value) -> String {
    record
        .get("id")
        .map(CellValue::from)
        .unwrap_or(CellValue::Empty)
        .to_string()
}

impl Backend for FileBackend {
    fn request(&mut self, request: Request) -> Result<Response> {
        debug!(method = %request.method, path = %request.path, "request");
        let segments: Vec<&str> = request
            .path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if let (Method::Post, ["login"]) = (request.method, segments.as_slice()) {
            return self.login(request.data.as_ref());
        }
        self.authorize(&request)?;

        match (request.method, segments.as_slice()) {
            (Method::Get, [collection]) => {
                let records = self.collection_mut(collection)?;
                Ok(Response::ok(Value::Array(records.clone())))
            }
            (Method::Post, [collection]) => self.create(collection, request.data),
            (Method::Get, [collection, id]) => {
                let records = self.collection_mut(collection)?;
                let index = Self::position(records, id)
                    .ok_or_else(|| Error::NotFound(format!("{}/{}", collection, id)))?;
                Ok(Response::ok(records[index].clone()))
            }
            (Method::Put, [collection, id]) => self.update(collection, id, request.data),
            (Method::Delete, [collection, id]) => self.delete(collection, id),
            (method, _) => Err(Error::BadRequest(format!(
                "no route for {} {}",
                method, request.path
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AUTHORIZATION;

    fn store() -> FileBackend {
        let mut document = Document::default();
        document.users.push(UserRecord {
            username: "ana".into(),
            password_hash: hash_password("secret"),
            role: Role::Admin,
        });
        document.collections.insert(
            "proveedores".into(),
            vec![json!({"id": 1, "name": "Bimbo"}), json!({"id": 2, "name": "Ledevit"})],
        );
        FileBackend::in_memory(document)
    }

    fn login(store: &mut FileBackend) -> String {
        let response = store
            .request(
                Request::new(Method::Post, "/login")
                    .with_data(json!({"username": "ana", "password": "secret"})),
            )
            .unwrap();
        assert_eq!(response.body["role"], json!("admin"));
        response.body["token"].as_str().unwrap().to_string()
    }

    fn authed(method: Method, path: &str, token: &str) -> Request {
        Request::new(method, path).with_header(AUTHORIZATION, format!("Bearer {}", token))
    }

    #[test]
    fn test_login_rejects_bad_password() {
        let mut store = store();
        let err = store
            .request(
                Request::new(Method::Post, "/login")
                    .with_data(json!({"username": "ana", "password": "nope"})),
            )
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_requests_need_a_token() {
        let mut store = store();
        let err = store
            .request(Request::new(Method::Get, "/proveedores"))
            .unwrap_err();
        assert!(err.is_unauthorized());

        let err = store
            .request(authed(Method::Get, "/proveedores", "forged"))
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_crud_round() {
        let mut store = store();
        let token = login(&mut store);

        let created = store
            .request(
                authed(Method::Post, "/proveedores", &token)
                    .with_data(json!({"name": "Molinos"})),
            )
            .unwrap();
        assert_eq!(created.status, 201);
        assert_eq!(created.body["id"], json!(3));

        let updated = store
            .request(
                authed(Method::Put, "/proveedores/3", &token)
                    .with_data(json!({"id": 99, "name": "Molinos SA"})),
            )
            .unwrap();
        assert_eq!(updated.body, json!({"id": 3, "name": "Molinos SA"}));

        let deleted = store
            .request(authed(Method::Delete, "/proveedores/1", &token))
            .unwrap();
        assert_eq!(deleted.status, 204);

        let list = store
            .request(authed(Method::Get, "/proveedores", &token))
            .unwrap();
        let names: Vec<&str> = list
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Ledevit", "Molinos SA"]);
    }

    #[test]
    fn test_unknown_records_and_routes() {
        let mut store = store();
        let token = login(&mut store);
        assert!(matches!(
            store.request(authed(Method::Delete, "/proveedores/42", &token)),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.request(authed(Method::Get, "/hornos", &token)),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.request(authed(Method::Put, "/proveedores", &token)),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn test_file_store_persists_and_seeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hornero.json");

        let mut store = FileBackend::open(&path, "pw").unwrap();
        assert!(path.exists());
        let response = store
            .request(
                Request::new(Method::Post, "/login")
                    .with_data(json!({"username": "admin", "password": "pw"})),
            )
            .unwrap();
        let token = response.body["token"].as_str().unwrap().to_string();
        store
            .request(
                authed(Method::Post, "/proveedores", &token)
                    .with_data(json!({"name": "Nuevo"})),
            )
            .unwrap();

        let reopened = FileBackend::open(&path, "ignored").unwrap();
        let providers = &reopened.document().collections["proveedores"];
        assert!(providers.iter().any(|p| p["name"] == json!("Nuevo")));
    }
}
