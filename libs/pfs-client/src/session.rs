use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use odata_core::{compose_url, find_by_pair, QueryIntent};
use pfs_model::{build_records, map_records_for, Record, Sample, SampleLot, Strain};
use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use crate::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::{HttpResult, PfsError, SessionConfig};

/// Discriminator attribute carried by every entity object.
pub const ENTITY_TYPE_FIELD: &str = "EntityTypeName";

/// Expansion that pulls sample lots and their mouse samples into assay rows.
pub const SAMPLE_EXPANSION: &str =
    "EXPERIMENT_SAMPLE($expand=ENTITY/pfs.MOUSE_SAMPLE_LOT($expand=SAMPLE/pfs.MOUSE_SAMPLE))";

pub const MOUSE_SAMPLE_ENTITY: &str = "MOUSE_SAMPLE";
pub const MOUSE_STRAIN_ENTITY: &str = "MOUSE_STRAIN";

/// `"cba glucose tolerance test"` → `"CBA_GLUCOSE_TOLERANCE_TEST"`.
pub fn format_experiment_name(name: &str) -> String {
    name.trim().replace(' ', "_").to_uppercase()
}

/// An authenticated view of one platform tenant.
pub struct PfsSession<T: Transport = ReqwestTransport> {
    config: SessionConfig,
    base_url: String,
    transport: T,
}

impl PfsSession<ReqwestTransport> {
    /// Session over a blocking `reqwest` client built from `config`.
    pub fn connect(config: SessionConfig) -> Result<Self, PfsError> {
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> PfsSession<T> {
    pub fn new(config: SessionConfig, transport: T) -> Self {
        let base_url = config.base_url();
        Self {
            config,
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn authorization(&self) -> Result<String, PfsError> {
        if self.config.username.is_empty() || self.config.password.is_empty() {
            return Err(PfsError::AuthenticationPrecondition);
        }
        let userpass = format!("{}:{}", self.config.username, self.config.password);
        Ok(format!("Basic {}", STANDARD.encode(userpass)))
    }

    fn exchange(
        &self,
        url: &str,
        method: Method,
        payload: Option<&Value>,
    ) -> Result<(u16, String, Vec<u8>), PfsError> {
        let mut request = HttpRequest {
            method: method.clone(),
            url: url.to_string(),
            headers: Vec::new(),
            body: payload.map(Value::to_string),
        }
        .header("Authorization", self.authorization()?)
        .header("Accept", "application/json");
        if payload.is_some() {
            request = request.header("Content-Type", "application/json");
        }
        if let Some(size) = self.config.page_size {
            request = request.header("Prefer", format!("odata.maxpagesize={size}"));
        }

        tracing::debug!(method = %method, url = %url, "sending request");
        let response = match self.transport.send(&request) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(method = %method, url = %url, error = %e, "request failed");
                return Err(e);
            }
        };

        let success = (200..=299).contains(&response.status);
        if success {
            tracing::debug!(
                method = %method, url = %url, success, status_code = response.status,
                message = %response.reason, "request completed"
            );
            Ok((response.status, response.reason, response.body))
        } else {
            tracing::error!(
                method = %method, url = %url, success, status_code = response.status,
                message = %response.reason, "request completed"
            );
            Err(PfsError::transport(Some(response.status), response.reason))
        }
    }

    /// Send one request and decode its JSON body. Non-2xx statuses and bodies
    /// that are not JSON both fail with [`PfsError::Transport`]; an empty body
    /// decodes to `null`.
    pub fn send_request(
        &self,
        url: &str,
        method: Method,
        payload: Option<&Value>,
    ) -> Result<HttpResult, PfsError> {
        let (status, reason, body) = self.exchange(url, method, payload)?;
        let data = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&body).map_err(|e| {
                tracing::error!(error = %e, url = %url, "bad JSON in response");
                PfsError::transport(Some(status), format!("Bad JSON in response: {e}"))
            })?
        };
        Ok(HttpResult::new(status, reason, data))
    }

    /// Verify the credentials against the service metadata document. The
    /// document itself is not decoded, so `data` is always `null`.
    #[instrument(name = "pfs.session.authenticate", skip_all, fields(base_url = %self.base_url))]
    pub fn authenticate(&self) -> Result<HttpResult, PfsError> {
        let url = format!("{}$metadata", self.base_url);
        let (status, reason, _) = self.exchange(&url, Method::GET, None)?;
        Ok(HttpResult::new(status, reason, Value::Null))
    }

    /// GET any entity set with the given query shape.
    #[instrument(name = "pfs.session.fetch_entity", skip_all, fields(entity = %entity_path))]
    pub fn fetch_entity(
        &self,
        entity_path: &str,
        intent: &QueryIntent,
    ) -> Result<HttpResult, PfsError> {
        let url = compose_url(&self.base_url, entity_path, intent);
        self.send_request(&url, Method::GET, None)
    }

    #[instrument(name = "pfs.session.fetch_experiment_data", skip_all, fields(experiment = %experiment))]
    pub fn fetch_experiment_data(
        &self,
        experiment: &str,
        intent: &QueryIntent,
    ) -> Result<HttpResult, PfsError> {
        let entity = format!("{}_EXPERIMENT", format_experiment_name(experiment));
        self.fetch_entity(&entity, intent)
    }

    #[instrument(name = "pfs.session.fetch_assay_data", skip_all, fields(experiment = %experiment))]
    pub fn fetch_assay_data(
        &self,
        experiment: &str,
        intent: &QueryIntent,
    ) -> Result<HttpResult, PfsError> {
        let entity = format!("{}_ASSAY_DATA", format_experiment_name(experiment));
        self.fetch_entity(&entity, intent)
    }

    /// Assay rows with their sample lots and mouse samples expanded. A caller
    /// supplied `$expand` replaces the default expansion.
    #[instrument(name = "pfs.session.fetch_sample_data", skip_all, fields(experiment = %experiment))]
    pub fn fetch_sample_data(
        &self,
        experiment: &str,
        intent: &QueryIntent,
    ) -> Result<HttpResult, PfsError> {
        let intent = match intent.expansion() {
            Some(_) => intent.clone(),
            None => intent.clone().expand(SAMPLE_EXPANSION),
        };
        self.fetch_assay_data(experiment, &intent)
    }

    /// Mouse samples reachable from an experiment's assay rows.
    pub fn get_samples(
        &self,
        experiment: &str,
        intent: &QueryIntent,
    ) -> Result<Vec<Sample>, PfsError> {
        let result = self.fetch_sample_data(experiment, intent)?;
        records_from_payload(&result.data)
    }

    /// Sample lots reachable from an experiment's assay rows.
    pub fn get_sample_lots(
        &self,
        experiment: &str,
        intent: &QueryIntent,
    ) -> Result<Vec<SampleLot>, PfsError> {
        let result = self.fetch_sample_data(experiment, intent)?;
        records_from_payload(&result.data)
    }

    #[instrument(name = "pfs.session.get_strains", skip_all)]
    pub fn get_strains(&self, intent: &QueryIntent) -> Result<Vec<Strain>, PfsError> {
        let result = self.fetch_entity(MOUSE_STRAIN_ENTITY, intent)?;
        records_from_payload(&result.data)
    }

    /// Mouse samples whose strain matches the intent's filter; filtered
    /// fields are qualified with `STRAIN/`.
    #[instrument(name = "pfs.session.get_samples_by_strain", skip_all)]
    pub fn get_samples_by_strain(&self, intent: &QueryIntent) -> Result<Vec<Sample>, PfsError> {
        let mut intent = intent.clone().filter_prefix("STRAIN/");
        if intent.expansion().is_none() {
            intent = intent.expand("STRAIN");
        }
        let result = self.fetch_entity(MOUSE_SAMPLE_ENTITY, &intent)?;
        records_from_payload(&result.data)
    }
}

/// Pull every entity of `R`'s kind out of a payload, rename its attributes and
/// build typed records. An entity reachable through several expansion paths
/// is returned once, at its first position; `7` and `"7"` count as one id.
pub fn records_from_payload<R: Record>(payload: &Value) -> Result<Vec<R>, PfsError> {
    let discriminator = Value::from(R::KIND.discriminator());
    let mut seen = HashSet::new();
    let raw: Vec<_> = find_by_pair(payload, ENTITY_TYPE_FIELD, &discriminator)
        .into_iter()
        .filter(|entity| match entity.get("Id") {
            Some(Value::String(id)) => seen.insert(id.clone()),
            Some(id) => seen.insert(id.to_string()),
            None => true,
        })
        .collect();

    let mapped = map_records_for(raw, R::KIND);
    let records = build_records(&mapped)?;
    tracing::debug!(kind = %R::KIND, count = records.len(), "built records");
    Ok(records)
}
