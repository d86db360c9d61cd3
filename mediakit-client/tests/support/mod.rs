//! Stateful in-process stand-in for the Media Services REST endpoint.
//!
//! One catch-all wiremock mock routes every request into [`FakeMediaBackend`],
//! which keeps entities in memory and answers with the OData verbose shapes
//! the real service uses.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use mediakit_client::{MediaClient, MediaService};
use percent_encoding::percent_decode_str;
use serde_json::{json, Map, Value};
use wiremock::{matchers::any, Mock, MockServer, Request, Respond, ResponseTemplate};

/// Well-formed ids that the backend never issues.
pub const FAKE_ASSET_ID: &str = "nb:cid:UUID:00000000-0000-4a00-0000-000000000000";
pub const FAKE_LOCATOR_ID: &str = "nb:lid:UUID:00000000-0000-4a00-0000-000000000000";
pub const TEST_ASSET_PREFIX: &str = "testAsset";
pub const API_ROOT: &str = "/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityKind {
    Asset,
    AccessPolicy,
    Locator,
    MediaProcessor,
}

impl EntityKind {
    fn from_set(entity_set: &str) -> Option<Self> {
        match entity_set {
            "Assets" => Some(Self::Asset),
            "AccessPolicies" => Some(Self::AccessPolicy),
            "Locators" => Some(Self::Locator),
            "MediaProcessors" => Some(Self::MediaProcessor),
            _ => None,
        }
    }

    const fn id_prefix(self) -> &'static str {
        match self {
            Self::Asset => "nb:cid:UUID:",
            Self::AccessPolicy => "nb:pid:UUID:",
            Self::Locator => "nb:lid:UUID:",
            Self::MediaProcessor => "nb:mpid:UUID:",
        }
    }

    const fn entity_set(self) -> &'static str {
        match self {
            Self::Asset => "Assets",
            Self::AccessPolicy => "AccessPolicies",
            Self::Locator => "Locators",
            Self::MediaProcessor => "MediaProcessors",
        }
    }

    /// Fields a client may change through MERGE.
    const fn mutable_fields(self) -> &'static [&'static str] {
        match self {
            Self::Asset => &["Name", "AlternateId", "Options", "State"],
            Self::Locator => &["StartTime", "ExpirationDateTime"],
            Self::AccessPolicy | Self::MediaProcessor => &[],
        }
    }
}

type Entity = Map<String, Value>;

#[derive(Debug, Default)]
struct Store {
    next_id: u64,
    entities: BTreeMap<(u8, String), Entity>,
}

fn slot(kind: EntityKind) -> u8 {
    kind as u8
}

fn odata_error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": {"code": "", "message": {"lang": "en-US", "value": message}}
    }))
}

fn wire_now() -> Value {
    Value::String(format!("/Date({})/", chrono::Utc::now().timestamp_millis()))
}

fn is_code_in(value: &Value, allowed: &[i64]) -> bool {
    value.as_i64().is_some_and(|code| allowed.contains(&code))
}

/// Split `Assets('nb%3Acid...')` into the set name and the unescaped key.
///
/// `Err` means the key syntax itself is malformed.
fn parse_path(path: &str) -> Result<(String, Option<String>), ()> {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let Some(open) = decoded.find('(') else {
        return Ok((decoded.into_owned(), None));
    };
    let set = decoded[..open].to_string();
    let key = decoded[open + 1..]
        .strip_suffix(')')
        .and_then(|k| k.strip_prefix('\''))
        .and_then(|k| k.strip_suffix('\''))
        .ok_or(())?;
    Ok((set, Some(key.replace("''", "'"))))
}

impl Store {
    fn seeded() -> Self {
        let mut store = Self::default();
        for (name, description) in [
            ("Windows Azure Media Encoder", "Encodes media to a range of formats"),
            ("Storage Decryption", "Decrypts storage encrypted assets"),
        ] {
            let id = store.new_id(EntityKind::MediaProcessor);
            let mut entity = Entity::new();
            entity.insert("Id".into(), json!(id));
            entity.insert("Name".into(), json!(name));
            entity.insert("Description".into(), json!(description));
            entity.insert("Sku".into(), json!(""));
            entity.insert("Vendor".into(), json!("Microsoft"));
            entity.insert("Version".into(), json!("1.0"));
            store.entities.insert((slot(EntityKind::MediaProcessor), id), entity);
        }
        store
    }

    fn new_id(&mut self, kind: EntityKind) -> String {
        self.next_id += 1;
        format!(
            "{}{:08x}-0000-4000-8000-{:012x}",
            kind.id_prefix(),
            self.next_id,
            self.next_id
        )
    }

    fn exists(&self, kind: EntityKind, id: &str) -> bool {
        self.entities.contains_key(&(slot(kind), id.to_string()))
    }

    fn handle(&mut self, request: &Request) -> ResponseTemplate {
        let Some(path) = request.url.path().strip_prefix(API_ROOT) else {
            return odata_error(404, "Unknown service root");
        };
        let Ok((set, key)) = parse_path(path.trim_start_matches('/')) else {
            return odata_error(400, "Bad Request - Error in query syntax.");
        };
        let Some(kind) = EntityKind::from_set(&set) else {
            return odata_error(404, &format!("Resource not found for the segment '{set}'."));
        };

        if let Some(ref id) = key {
            if !id.starts_with(kind.id_prefix()) {
                return odata_error(400, &format!("Invalid {} id: {id}", kind.entity_set()));
            }
        }

        match (request.method.as_str(), key) {
            ("GET", None) => self.list(kind, request),
            ("POST", None) => self.create(kind, &request.body),
            ("GET", Some(id)) => self.get(kind, &id),
            ("MERGE", Some(id)) => self.merge(kind, &id, &request.body),
            ("DELETE", Some(id)) => self.delete(kind, &id),
            _ => odata_error(405, "Method not allowed"),
        }
    }

    fn list(&self, kind: EntityKind, request: &Request) -> ResponseTemplate {
        let mut top = usize::MAX;
        let mut skip = 0;
        for (name, value) in request.url.query_pairs() {
            match name.as_ref() {
                "$top" => top = value.parse().unwrap_or(top),
                "$skip" => skip = value.parse().unwrap_or(skip),
                _ => {}
            }
        }
        let results: Vec<&Entity> = self
            .entities
            .iter()
            .filter(|((k, _), _)| *k == slot(kind))
            .map(|(_, entity)| entity)
            .skip(skip)
            .take(top)
            .collect();
        ResponseTemplate::new(200).set_body_json(json!({"d": {"results": results}}))
    }

    fn get(&self, kind: EntityKind, id: &str) -> ResponseTemplate {
        match self.entities.get(&(slot(kind), id.to_string())) {
            Some(entity) => ResponseTemplate::new(200).set_body_json(json!({"d": entity})),
            None => odata_error(404, &format!("Resource {} not found", kind.entity_set())),
        }
    }

    fn create(&mut self, kind: EntityKind, body: &[u8]) -> ResponseTemplate {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return odata_error(400, "Request body must be a JSON object");
        };

        let entity = match kind {
            EntityKind::Asset => self.build_asset(&fields),
            EntityKind::AccessPolicy => self.build_access_policy(&fields),
            EntityKind::Locator => self.build_locator(&fields),
            EntityKind::MediaProcessor => return odata_error(405, "Media processors are read-only"),
        };

        match entity {
            Ok(entity) => {
                let id = entity["Id"].as_str().unwrap_or_default().to_string();
                self.entities.insert((slot(kind), id), entity.clone());
                ResponseTemplate::new(201).set_body_json(json!({"d": entity}))
            }
            Err(message) => odata_error(400, &message),
        }
    }

    fn build_asset(&mut self, fields: &Entity) -> Result<Entity, String> {
        let options = fields.get("Options").cloned().unwrap_or(json!(0));
        if !is_code_in(&options, &[0, 1, 2]) {
            return Err(format!("Invalid asset Options: {options}"));
        }
        let state = fields.get("State").cloned().unwrap_or(json!(0));
        if !is_code_in(&state, &[0, 1, 2]) {
            return Err(format!("Invalid asset State: {state}"));
        }

        let id = self.new_id(EntityKind::Asset);
        let mut entity = Entity::new();
        entity.insert(
            "__metadata".into(),
            json!({"uri": format!("{API_ROOT}/Assets('{id}')")}),
        );
        entity.insert("Id".into(), json!(id));
        entity.insert("Name".into(), fields.get("Name").cloned().unwrap_or(Value::Null));
        entity.insert(
            "AlternateId".into(),
            fields.get("AlternateId").cloned().unwrap_or(Value::Null),
        );
        entity.insert("Options".into(), options);
        entity.insert("State".into(), state);
        entity.insert("Created".into(), wire_now());
        entity.insert("LastModified".into(), wire_now());
        Ok(entity)
    }

    fn build_access_policy(&mut self, fields: &Entity) -> Result<Entity, String> {
        let name = fields
            .get("Name")
            .and_then(Value::as_str)
            .ok_or("AccessPolicy Name is required")?;
        let duration = fields
            .get("DurationInMinutes")
            .and_then(Value::as_f64)
            .filter(|d| *d > 0.0)
            .ok_or("AccessPolicy DurationInMinutes must be positive")?;
        let permissions = fields.get("Permissions").and_then(Value::as_u64).unwrap_or(0);
        if permissions > 0b1111 {
            return Err(format!("Invalid Permissions: {permissions}"));
        }

        let id = self.new_id(EntityKind::AccessPolicy);
        let mut entity = Entity::new();
        entity.insert("Id".into(), json!(id));
        entity.insert("Name".into(), json!(name));
        entity.insert("DurationInMinutes".into(), json!(duration));
        entity.insert("Permissions".into(), json!(permissions));
        entity.insert("Created".into(), wire_now());
        entity.insert("LastModified".into(), wire_now());
        Ok(entity)
    }

    fn build_locator(&mut self, fields: &Entity) -> Result<Entity, String> {
        let policy_id = fields
            .get("AccessPolicyId")
            .and_then(Value::as_str)
            .filter(|id| self.exists(EntityKind::AccessPolicy, id))
            .ok_or("Locator requires an existing AccessPolicyId")?
            .to_string();
        let asset_id = fields
            .get("AssetId")
            .and_then(Value::as_str)
            .filter(|id| self.exists(EntityKind::Asset, id))
            .ok_or("Locator requires an existing AssetId")?
            .to_string();
        let locator_type = fields.get("Type").cloned().unwrap_or(Value::Null);
        if !is_code_in(&locator_type, &[1, 2]) {
            return Err(format!("Invalid locator Type: {locator_type}"));
        }

        let id = self.new_id(EntityKind::Locator);
        let path = if locator_type == json!(1) {
            format!("https://storage.example.com/asset-{}?sv=2012-02-12&sig=fake", &asset_id[12..])
        } else {
            format!("https://origin.example.com/{}/", &id[12..])
        };

        let mut entity = Entity::new();
        entity.insert("Id".into(), json!(id));
        entity.insert("AccessPolicyId".into(), json!(policy_id));
        entity.insert("AssetId".into(), json!(asset_id));
        entity.insert("Type".into(), locator_type);
        entity.insert("Path".into(), json!(path));
        entity.insert(
            "StartTime".into(),
            fields.get("StartTime").cloned().unwrap_or(Value::Null),
        );
        entity.insert(
            "ExpirationDateTime".into(),
            fields.get("ExpirationDateTime").cloned().unwrap_or(Value::Null),
        );
        Ok(entity)
    }

    fn merge(&mut self, kind: EntityKind, id: &str, body: &[u8]) -> ResponseTemplate {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return odata_error(400, "Request body must be a JSON object");
        };
        let allowed = kind.mutable_fields();
        if allowed.is_empty() {
            return odata_error(405, &format!("{} cannot be updated", kind.entity_set()));
        }
        if let Some(field) = fields.keys().find(|f| !allowed.contains(&f.as_str())) {
            return odata_error(400, &format!("Property '{field}' cannot be updated"));
        }

        let Some(entity) = self.entities.get_mut(&(slot(kind), id.to_string())) else {
            return odata_error(404, &format!("Resource {} not found", kind.entity_set()));
        };
        if !fields.is_empty() {
            entity.extend(fields);
            if kind == EntityKind::Asset {
                entity.insert("LastModified".into(), wire_now());
            }
        }
        ResponseTemplate::new(204)
    }

    fn delete(&mut self, kind: EntityKind, id: &str) -> ResponseTemplate {
        if kind == EntityKind::MediaProcessor {
            return odata_error(405, "Media processors are read-only");
        }
        match self.entities.remove(&(slot(kind), id.to_string())) {
            Some(_) => ResponseTemplate::new(204),
            None => odata_error(404, &format!("Resource {} not found", kind.entity_set())),
        }
    }
}

/// In-memory backend shared between the mock server and the test body.
#[derive(Debug, Clone)]
pub struct FakeMediaBackend {
    store: Arc<Mutex<Store>>,
}

impl FakeMediaBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::seeded())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Respond for FakeMediaBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.lock().handle(request)
    }
}

/// A running fake endpoint plus a service pointed at it.
///
/// The server shuts down when the env is dropped.
pub struct TestEnv {
    _server: MockServer,
    pub service: MediaService,
}

impl TestEnv {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let backend = FakeMediaBackend::new();
        Mock::given(any())
            .respond_with(backend)
            .mount(&server)
            .await;

        let client = MediaClient::with_token(format!("{}{API_ROOT}/", server.uri()), "test-token")
            .expect("mock server uri is a valid endpoint");
        Self {
            _server: server,
            service: MediaService::new(client),
        }
    }
}
