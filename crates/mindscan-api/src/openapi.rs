// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

#[must_use]
pub fn openapi_v1_spec() -> Value {
    let view = json!({"$ref": "#/components/schemas/ViewEnvelope"});
    json!({
      "openapi": "3.0.3",
      "info": {
        "title": "mindscan API",
        "version": "v1"
      },
      "paths": {
        "/": {"get": {"responses": {"200": {"description": "quiz input view"}}}},
        "/healthz": {"get": {"responses": {"200": {"description": "ok"}}}},
        "/metrics": {"get": {"responses": {"200": {"description": "prometheus metrics"}}}},
        "/predict": {
          "post": {
            "requestBody": {
              "required": true,
              "content": {
                "application/x-www-form-urlencoded": {
                  "schema": {"$ref": "#/components/schemas/QuizForm"}
                },
                "multipart/form-data": {
                  "schema": {"$ref": "#/components/schemas/QuizForm"}
                }
              }
            },
            "responses": {
              "200": {
                "description": "results view, or input view annotated with an error",
                "content": {
                  "application/json": {"schema": view},
                  "text/html": {"schema": {"type": "string"}}
                }
              },
              "413": {"description": "request body too large"}
            }
          }
        },
        "/readyz": {"get": {"responses": {"200": {"description": "ready"}, "503": {"description": "not ready"}}}},
        "/v1/openapi.json": {"get": {"responses": {"200": {"description": "this document"}}}},
        "/v1/version": {"get": {"responses": {"200": {"description": "build and artifact provenance"}}}}
      },
      "components": {
        "schemas": {
          "ApiError": {
            "type": "object",
            "required": ["code", "message", "details", "request_id"],
            "additionalProperties": false,
            "properties": {
              "code": {"$ref": "#/components/schemas/ApiErrorCode"},
              "details": {"type": "object"},
              "message": {"type": "string"},
              "request_id": {"type": "string"}
            }
          },
          "ApiErrorCode": {
            "type": "string",
            "enum": ["MissingFields", "ProcessingError"]
          },
          "QuizForm": quiz_form_schema(),
          "ResultsView": {
            "type": "object",
            "required": ["depression", "satisfaction", "personality", "recommendation"],
            "additionalProperties": false,
            "properties": {
              "depression": {"type": "string"},
              "personality": {"type": "string"},
              "recommendation": {
                "type": "object",
                "required": ["dep", "sat", "big"],
                "properties": {
                  "big": {"type": "string"},
                  "dep": {"type": "string"},
                  "sat": {"type": "string"}
                }
              },
              "satisfaction": {"type": "string"}
            }
          },
          "ViewEnvelope": {
            "type": "object",
            "required": ["api_version", "view"],
            "additionalProperties": false,
            "properties": {
              "api_version": {"type": "string"},
              "data": {"$ref": "#/components/schemas/ResultsView"},
              "error": {"$ref": "#/components/schemas/ApiError"},
              "view": {"type": "string", "enum": ["input", "results"]}
            }
          }
        }
      }
    })
}

fn quiz_form_schema() -> Value {
    let keys = mindscan_model::question_keys();
    let properties: serde_json::Map<String, Value> = keys
        .iter()
        .map(|k| (k.clone(), json!({"type": "string", "pattern": "^\\s*[+-]?[0-9]+\\s*$"})))
        .collect();
    json!({
        "type": "object",
        "required": keys,
        "properties": properties
    })
}
