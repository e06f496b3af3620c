// src/web/openapi.rs

//! Machine-readable description of the HTTP surface, served at `/docs/json`,
//! and the Swagger UI page at `/docs` that renders it.

use crate::status::StatusCode;
use serde_json::{json, Value};

/// Swagger UI shell; the bundle comes from a CDN and reads `/docs/json`.
pub(crate) const DOCS_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>nice-clone API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <noscript>The OpenAPI document is available at <a href="/docs/json">/docs/json</a>.</noscript>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: "/docs/json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;

pub fn openapi_document() -> Value {
    let codes: Vec<Value> = StatusCode::ALL
        .iter()
        .map(|code| json!(code.as_u32()))
        .collect();
    let code_names: Vec<String> = StatusCode::ALL
        .iter()
        .map(|code| format!("{} = {}", code.as_u32(), code.name()))
        .collect();

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "nice-clone",
            "description": "Clones git repositories into a managed base directory. Every response is HTTP 200; branch on `ok` and `code`.",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/git/clone": {
                "post": {
                    "summary": "Clone a repository",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CloneRequest" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Envelope carrying a CloneResult on success",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CloneEnvelope" },
                                    "examples": clone_examples()
                                }
                            }
                        }
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Liveness probe",
                    "responses": {
                        "200": { "description": "Envelope carrying the service status and version" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "CloneRequest": {
                    "type": "object",
                    "required": ["url"],
                    "properties": {
                        "url": {
                            "type": "string",
                            "example": "https://github.com/vercel/nice.git"
                        },
                        "dirName": {
                            "type": "string",
                            "description": "Target directory name. Derived from the url when omitted."
                        }
                    }
                },
                "CloneResult": {
                    "type": "object",
                    "properties": {
                        "targetPath": { "type": "string" },
                        "dirName": { "type": "string" }
                    }
                },
                "ErrorInfo": {
                    "type": "object",
                    "properties": {
                        "kind": { "type": "string", "example": "GIT_CLONE_FAILED" },
                        "traceId": { "type": "string" }
                    }
                },
                "CloneEnvelope": {
                    "type": "object",
                    "required": ["ok", "code"],
                    "properties": {
                        "ok": { "type": "boolean" },
                        "code": {
                            "type": "integer",
                            "enum": codes,
                            "description": code_names.join(", "),
                        },
                        "message": { "type": "string" },
                        "data": { "$ref": "#/components/schemas/CloneResult" },
                        "error": { "$ref": "#/components/schemas/ErrorInfo" }
                    }
                }
            }
        }
    })
}

/// One example envelope per outcome of `POST /git/clone`.
fn clone_examples() -> Value {
    let failure = |code: StatusCode, message: &str| {
        json!({
            "value": {
                "ok": false,
                "code": code.as_u32(),
                "message": message,
                "error": { "kind": code.name(), "traceId": "3f0c6a8e-5d1b-4c47-9a4e-2b7d1e9f0a11" }
            }
        })
    };

    json!({
        "cloned": {
            "value": {
                "ok": true,
                "code": StatusCode::Ok.as_u32(),
                "data": { "targetPath": "/home/dev/nice-repos/nice", "dirName": "nice" }
            }
        },
        "invalidArgument": failure(StatusCode::InvalidArgument, "missing a valid repository url"),
        "alreadyExists": failure(
            StatusCode::AlreadyExists,
            "target directory already exists: /home/dev/nice-repos/nice"
        ),
        "cloneFailed": failure(
            StatusCode::CloneFailed,
            "clone failed: clone timed out after 600s without progress"
        ),
        "unknownError": failure(StatusCode::UnknownError, "internal server error"),
    })
}
