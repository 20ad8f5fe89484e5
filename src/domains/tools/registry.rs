//! Tool Registry - decides which tools exist and dispatches calls to them.
//!
//! Tools are described by a fixed capability table. At startup
//! [`register_all`] walks the table and registers a [`ToolDescriptor`] for
//! every capability whose governing setting is non-empty. The resulting
//! registry is never modified afterwards.

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{debug, info, instrument, warn};

use super::definitions::{
    AvailabilityParams, AvailabilityTool, FrontendLinkParams, FrontendLinkTool, ParamSpec,
    SearchParams, SearchTool,
};
use super::error::ToolError;
use super::handlers::ToolOutput;
use crate::core::client::LineClient;
use crate::core::config::ServiceSettings;

// ============================================================================
// Capability table
// ============================================================================

/// How a tool turns its arguments into output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// DAIA availability lookup.
    Availability,
    /// Catalogue or article search.
    Search,
    /// Frontend link built from a URL prefix, no request.
    FrontendLink,
}

impl ToolKind {
    /// Ordered parameter list for this kind of tool.
    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            Self::Availability => AvailabilityTool::PARAMS,
            Self::Search => SearchTool::PARAMS,
            Self::FrontendLink => FrontendLinkTool::PARAMS,
        }
    }

    /// JSON schema of the tool input.
    pub fn input_schema(self) -> Arc<JsonObject> {
        match self {
            Self::Availability => cached_schema_for_type::<AvailabilityParams>(),
            Self::Search => cached_schema_for_type::<SearchParams>(),
            Self::FrontendLink => cached_schema_for_type::<FrontendLinkParams>(),
        }
    }
}

/// The settings field whose presence enables a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    AvailabilityUrl,
    CatalogueSearchUrl,
    ArticleSearchUrl,
    CatalogueFrontendUrlTemplate,
    ArticleFrontendUrlTemplate,
}

impl SettingsField {
    pub fn read(self, settings: &ServiceSettings) -> &str {
        match self {
            Self::AvailabilityUrl => &settings.availability_url,
            Self::CatalogueSearchUrl => &settings.catalogue_search_url,
            Self::ArticleSearchUrl => &settings.article_search_url,
            Self::CatalogueFrontendUrlTemplate => &settings.catalogue_frontend_url_template,
            Self::ArticleFrontendUrlTemplate => &settings.article_frontend_url_template,
        }
    }
}

/// One row of the capability table.
#[derive(Debug, Clone, Copy)]
pub struct Capability {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ToolKind,
    pub endpoint: &'static str,
    pub governed_by: SettingsField,
}

/// Every tool the server knows about, in registration order.
pub const CAPABILITIES: [Capability; 5] = [
    Capability {
        name: AvailabilityTool::NAME,
        description: AvailabilityTool::DESCRIPTION,
        kind: ToolKind::Availability,
        endpoint: AvailabilityTool::ENDPOINT,
        governed_by: SettingsField::AvailabilityUrl,
    },
    Capability {
        name: SearchTool::CATALOGUE_NAME,
        description: SearchTool::CATALOGUE_DESCRIPTION,
        kind: ToolKind::Search,
        endpoint: SearchTool::ENDPOINT,
        governed_by: SettingsField::CatalogueSearchUrl,
    },
    Capability {
        name: SearchTool::ARTICLE_NAME,
        description: SearchTool::ARTICLE_DESCRIPTION,
        kind: ToolKind::Search,
        endpoint: SearchTool::ENDPOINT,
        governed_by: SettingsField::ArticleSearchUrl,
    },
    Capability {
        name: FrontendLinkTool::CATALOGUE_NAME,
        description: FrontendLinkTool::CATALOGUE_DESCRIPTION,
        kind: ToolKind::FrontendLink,
        endpoint: "",
        governed_by: SettingsField::CatalogueFrontendUrlTemplate,
    },
    Capability {
        name: FrontendLinkTool::ARTICLE_NAME,
        description: FrontendLinkTool::ARTICLE_DESCRIPTION,
        kind: ToolKind::FrontendLink,
        endpoint: "",
        governed_by: SettingsField::ArticleFrontendUrlTemplate,
    },
];

// ============================================================================
// Tool Descriptor
// ============================================================================

/// A registered tool: a capability bound to its configured URL.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ToolKind,
    pub params: &'static [ParamSpec],
    /// Base URL for network tools, URL prefix for link tools.
    pub base_url: String,
    pub endpoint: &'static str,
    client: Arc<LineClient>,
}

impl ToolDescriptor {
    /// Bind `capability` to `base_url`.
    pub fn new(
        capability: &Capability,
        base_url: impl Into<String>,
        client: Arc<LineClient>,
    ) -> Self {
        Self {
            name: capability.name,
            description: capability.description,
            kind: capability.kind,
            params: capability.kind.params(),
            base_url: base_url.into(),
            endpoint: capability.endpoint,
            client,
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: self.kind.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Run the tool with raw JSON arguments.
    ///
    /// Missing arguments take their defaults. Only malformed arguments are
    /// reported as errors; upstream failures are part of the output.
    #[instrument(skip(self, arguments), fields(tool = self.name))]
    pub async fn call(&self, arguments: JsonObject) -> Result<ToolOutput, ToolError> {
        let arguments = serde_json::Value::Object(arguments);

        let output = match self.kind {
            ToolKind::Availability => {
                let params: AvailabilityParams = serde_json::from_value(arguments)?;
                ToolOutput::Lines(
                    AvailabilityTool::execute(&params, &self.base_url, self.endpoint, &self.client)
                        .await,
                )
            }
            ToolKind::Search => {
                let params: SearchParams = serde_json::from_value(arguments)?;
                ToolOutput::Lines(
                    SearchTool::execute(&params, &self.base_url, self.endpoint, &self.client).await,
                )
            }
            ToolKind::FrontendLink => {
                let params: FrontendLinkParams = serde_json::from_value(arguments)?;
                ToolOutput::Text(FrontendLinkTool::link(&self.base_url, &params.ppn))
            }
        };

        Ok(output)
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - the set of tools served to clients.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<ToolDescriptor>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every tool enabled by `settings`.
    pub fn from_settings(settings: &ServiceSettings, client: Arc<LineClient>) -> Self {
        let mut registry = Self::new();
        register_all(settings, &client, &mut registry);
        registry
    }

    /// Add a tool. A tool with the same name is replaced.
    pub fn insert(&mut self, descriptor: ToolDescriptor) {
        let descriptor = Arc::new(descriptor);
        match self.tools.iter_mut().find(|t| t.name == descriptor.name) {
            Some(existing) => {
                warn!("Tool {} registered twice, replacing it", descriptor.name);
                *existing = descriptor;
            }
            None => self.tools.push(descriptor),
        }
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<ToolDescriptor>> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Iterate over tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ToolDescriptor>> {
        self.tools.iter()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.to_tool()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a tool call by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let Some(tool) = self.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        Ok(tool.call(arguments).await?.into_call_result())
    }
}

/// Register every capability whose governing setting is non-empty.
pub fn register_all(
    settings: &ServiceSettings,
    client: &Arc<LineClient>,
    registry: &mut ToolRegistry,
) {
    for capability in &CAPABILITIES {
        let base_url = capability.governed_by.read(settings);
        if base_url.is_empty() {
            debug!(
                "{} disabled: {:?} not configured",
                capability.name, capability.governed_by
            );
            continue;
        }

        info!("{} tool set", capability.name);
        registry.insert(ToolDescriptor::new(capability, base_url, client.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::tests::MockBackend;
    use crate::domains::tools::definitions::ParamDefault;

    fn full_settings() -> ServiceSettings {
        ServiceSettings {
            catalogue_search_url: "https://katalog.example.org/api/v1/search".to_string(),
            article_search_url: "https://katalog.example.org/api/v1/articles".to_string(),
            availability_url: "https://daia.example.org".to_string(),
            catalogue_frontend_url_template: "https://katalog.example.org/Record/".to_string(),
            article_frontend_url_template: "https://katalog.example.org/Article/".to_string(),
            server_mode: String::new(),
        }
    }

    fn mock_client(backend: Arc<MockBackend>) -> Arc<LineClient> {
        Arc::new(LineClient::with_backend(backend))
    }

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_empty_settings_register_nothing() {
        let client = mock_client(Arc::new(MockBackend::ok("")));
        let registry = ToolRegistry::from_settings(&ServiceSettings::default(), client);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_full_settings_register_all_in_order() {
        let client = mock_client(Arc::new(MockBackend::ok("")));
        let registry = ToolRegistry::from_settings(&full_settings(), client);

        assert_eq!(
            registry.tool_names(),
            vec![
                "get_availability",
                "search_literature",
                "search_article",
                "frontend_link",
                "frontend_link_article",
            ]
        );
    }

    #[test]
    fn test_each_field_enables_exactly_one_tool() {
        let client = mock_client(Arc::new(MockBackend::ok("")));

        for capability in &CAPABILITIES {
            let mut settings = ServiceSettings::default();
            match capability.governed_by {
                SettingsField::AvailabilityUrl => settings.availability_url = "u".into(),
                SettingsField::CatalogueSearchUrl => settings.catalogue_search_url = "u".into(),
                SettingsField::ArticleSearchUrl => settings.article_search_url = "u".into(),
                SettingsField::CatalogueFrontendUrlTemplate => {
                    settings.catalogue_frontend_url_template = "u".into()
                }
                SettingsField::ArticleFrontendUrlTemplate => {
                    settings.article_frontend_url_template = "u".into()
                }
            }

            let registry = ToolRegistry::from_settings(&settings, client.clone());
            assert_eq!(registry.tool_names(), vec![capability.name]);
            assert_eq!(registry.get(capability.name).unwrap().base_url, "u");
        }
    }

    #[test]
    fn test_missing_field_disables_tool() {
        let client = mock_client(Arc::new(MockBackend::ok("")));
        let settings = ServiceSettings {
            availability_url: String::new(),
            ..full_settings()
        };

        let registry = ToolRegistry::from_settings(&settings, client);

        assert_eq!(registry.len(), 4);
        assert!(registry.get("get_availability").is_none());
    }

    #[test]
    fn test_parameter_defaults() {
        let client = mock_client(Arc::new(MockBackend::ok("")));
        let registry = ToolRegistry::from_settings(&full_settings(), client);

        let search = registry.get("search_literature").unwrap();
        let names: Vec<_> = search.params.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["offset", "limit", "lookfor"]);
        assert_eq!(search.params[0].default, ParamDefault::Integer(0));
        assert_eq!(search.params[1].default, ParamDefault::Integer(100));
        assert_eq!(search.params[2].default, ParamDefault::String("*"));

        let availability = registry.get("get_availability").unwrap();
        let names: Vec<_> = availability.params.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["offset", "limit", "ppn"]);
        assert_eq!(availability.endpoint, "daia");

        let link = registry.get("frontend_link_article").unwrap();
        assert_eq!(link.params.len(), 1);
        assert_eq!(link.params[0].default, ParamDefault::String("*"));
    }

    #[test]
    fn test_schema_properties_match_param_specs() {
        for capability in &CAPABILITIES {
            let schema = capability.kind.input_schema();
            let properties = schema
                .get("properties")
                .and_then(|p| p.as_object())
                .expect("schema has properties");

            for param in capability.kind.params() {
                assert!(
                    properties.contains_key(param.name),
                    "{} schema lacks {}",
                    capability.name,
                    param.name
                );
            }
            assert_eq!(properties.len(), capability.kind.params().len());
        }
    }

    #[test]
    fn test_registration_is_repeatable() {
        let client = mock_client(Arc::new(MockBackend::ok("")));
        let settings = full_settings();

        let first = ToolRegistry::from_settings(&settings, client.clone());
        let second = ToolRegistry::from_settings(&settings, client);

        assert_eq!(first.tool_names(), second.tool_names());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.base_url, b.base_url);
            assert_eq!(a.params, b.params);
        }
    }

    #[test]
    fn test_double_registration_replaces() {
        let client = mock_client(Arc::new(MockBackend::ok("")));
        let settings = full_settings();
        let mut registry = ToolRegistry::new();

        register_all(&settings, &client, &mut registry);
        register_all(&settings, &client, &mut registry);

        assert_eq!(registry.len(), CAPABILITIES.len());
    }

    #[test]
    fn test_frontend_link_makes_no_request() {
        let backend = Arc::new(MockBackend::ok("unused"));
        let registry = ToolRegistry::from_settings(&full_settings(), mock_client(backend.clone()));
        let link = registry.get("frontend_link").unwrap();

        let output =
            tokio_test::block_on(link.call(args(serde_json::json!({"ppn": "1650994282"}))))
                .unwrap();
        assert_eq!(
            output,
            ToolOutput::Text("https://katalog.example.org/Record/1650994282".to_string())
        );

        let output = tokio_test::block_on(link.call(JsonObject::new())).unwrap();
        assert_eq!(
            output,
            ToolOutput::Text("https://katalog.example.org/Record/*".to_string())
        );

        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_availability_call_uses_bound_url() {
        let backend = Arc::new(MockBackend::ok("{}\n"));
        let registry = ToolRegistry::from_settings(&full_settings(), mock_client(backend.clone()));

        let output = registry
            .get("get_availability")
            .unwrap()
            .call(args(serde_json::json!({"ppn": "42"})))
            .await
            .unwrap();

        assert_eq!(output.as_lines().unwrap(), ["{}"]);
        assert_eq!(
            backend.last_url().unwrap(),
            "https://daia.example.org/daia?id=ppn:42&format=json&offset=0&limit=100"
        );
    }

    #[tokio::test]
    async fn test_article_search_uses_article_url() {
        let backend = Arc::new(MockBackend::ok("hit"));
        let registry = ToolRegistry::from_settings(&full_settings(), mock_client(backend.clone()));

        registry
            .call_tool("search_article", args(serde_json::json!({"lookfor": "rust"})))
            .await
            .unwrap();

        assert_eq!(
            backend.last_url().unwrap(),
            "https://katalog.example.org/api/v1/articles?lookfor=rust&offset=0&limit=100"
        );
    }

    #[tokio::test]
    async fn test_upstream_error_is_a_successful_call() {
        let backend = Arc::new(MockBackend::respond(500, "boom\n"));
        let registry = ToolRegistry::from_settings(&full_settings(), mock_client(backend));

        let result = registry
            .call_tool("search_literature", JsonObject::new())
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(
            result.structured_content,
            Some(serde_json::json!({ "result": ["Error 500: boom"] }))
        );
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = ToolRegistry::new();
        let result = registry.call_tool("unknown", JsonObject::new()).await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_call_with_invalid_arguments() {
        let client = mock_client(Arc::new(MockBackend::ok("")));
        let registry = ToolRegistry::from_settings(&full_settings(), client);

        let result = registry
            .call_tool("search_literature", args(serde_json::json!({"offset": "ten"})))
            .await;

        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
