//! Tool definitions for function calling

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A function the model may call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    pub parameters: ToolParameters,
}

/// JSON schema of a tool's arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameters {
    /// Always "object" for function tools
    #[serde(rename = "type")]
    pub schema_type: String,

    pub properties: Value,

    #[serde(default)]
    pub required: Vec<String>,
}

impl ToolDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: ToolParameters {
                schema_type: "object".to_string(),
                properties: json!({}),
                required: vec![],
            },
        }
    }

    /// Build from a full object schema (`{"type": "object", "properties": .., "required": [..]}`)
    pub fn from_schema(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: &Value,
    ) -> Self {
        let mut def = Self::new(name, description);
        if let Some(properties) = schema.get("properties").filter(|p| p.is_object()) {
            def.parameters.properties = properties.clone();
        }
        if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
            def.parameters.required = required
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
        def
    }

    fn with_property(mut self, name: String, schema: Value, required: bool) -> Self {
        if !self.parameters.properties.is_object() {
            self.parameters.properties = Value::Object(Map::new());
        }
        if let Value::Object(ref mut props) = self.parameters.properties {
            props.insert(name.clone(), schema);
        }
        if required {
            self.parameters.required.push(name);
        }
        self
    }

    pub fn with_string_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let schema = json!({"type": "string", "description": description.into()});
        self.with_property(name.into(), schema, required)
    }

    pub fn with_integer_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let schema = json!({"type": "integer", "description": description.into()});
        self.with_property(name.into(), schema, required)
    }

    pub fn with_boolean_param(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let schema = json!({"type": "boolean", "description": description.into()});
        self.with_property(name.into(), schema, required)
    }

    /// The parameters as one JSON schema object
    pub fn schema(&self) -> Value {
        json!({
            "type": self.parameters.schema_type,
            "properties": self.parameters.properties,
            "required": self.parameters.required,
        })
    }
}
