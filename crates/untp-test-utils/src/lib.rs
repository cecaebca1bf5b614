//! Testing utilities for the UNTP migration workspace
//!
//! Shared JSON fixture builders for app-config documents.

#![allow(missing_docs)]

use serde_json::{json, Value};

pub const DFR_SCHEMA_URL: &str =
    "https://jargon.sh/user/unece/DigitalFacilityRecord/v/0.5.0/artefacts/jsonSchemas/FacilityRecord.json?class=FacilityRecord";
pub const DTE_SCHEMA_URL: &str =
    "https://test.uncefact.org/vocabulary/untp/traceabilityEvents/v/0.5.0/schema.json";
pub const DPP_SCHEMA_URL: &str =
    "https://jargon.sh/user/unece/DigitalProductPassport/v/0.5.0/artefacts/jsonSchemas/ProductPassport.json";
pub const UNKNOWN_SCHEMA_URL: &str = "https://example.com/schemas/unrelated.json";

/// `EntryData` component with a plain form
pub fn entry_data(name: &str, schema_url: &str) -> Value {
    json!({
        "name": name,
        "type": "EntryData",
        "props": {
            "schema": { "url": schema_url },
            "data": {}
        }
    })
}

/// Element of a `LocalStorageLoader`'s `nestedComponents`
pub fn nested_form(schema_url: &str) -> Value {
    json!({
        "name": "JsonForm",
        "type": "EntryData",
        "props": {
            "schema": { "url": schema_url },
            "data": {}
        }
    })
}

pub fn local_storage_loader(nested: Vec<Value>) -> Value {
    json!({
        "name": "LocalStorageLoader",
        "type": "EntryData",
        "props": {
            "storageKey": "local",
            "nestedComponents": nested
        }
    })
}

/// 0.5.0 facility record payload
pub fn dfr_data() -> Value {
    json!({
        "@context": [
            "https://www.w3.org/ns/credentials/v2",
            "https://test.uncefact.org/vocabulary/untp/dfr/0.5.0/"
        ],
        "type": ["DigitalFacilityRecord", "VerifiableCredential"],
        "id": "https://example.com/credentials/1",
        "issuer": {
            "type": ["CredentialIssuer"],
            "id": "did:web:example.com",
            "name": "Example Mine",
            "otherIdentifier": [{"id": "abn-1", "type": ["Identifier"]}]
        },
        "credentialSubject": {
            "type": ["Facility"],
            "id": "https://example.com/facility/1",
            "name": "Processing Plant",
            "otherIdentifier": [
                {
                    "id": "y",
                    "type": ["Identifier"],
                    "idScheme": {"type": ["IdentifierScheme"], "id": "https://abr.business.gov.au/ABN/"}
                }
            ],
            "operatedByParty": {
                "id": "https://abr.business.gov.au/ABN/View?abn=1",
                "name": "Operator",
                "type": ["Identifier"],
                "idScheme": {"type": ["IdentifierScheme"], "id": "https://abr.business.gov.au/ABN/"}
            },
            "conformityClaim": [
                {
                    "id": "claim-1",
                    "assessmentCriteria": [{"id": "crit-1", "name": "Emissions"}]
                }
            ]
        }
    })
}

/// Facility-record `EntryData` component with a full 0.5.0 payload
pub fn dfr_component() -> Value {
    json!({
        "name": "JsonForm",
        "type": "EntryData",
        "props": {
            "schema": { "url": DFR_SCHEMA_URL },
            "data": dfr_data()
        }
    })
}

/// Service parameters with storage and identity-resolver blocks
pub fn process_service(name: &str) -> Value {
    json!({
        "name": name,
        "parameters": [
            {
                "vckit": {
                    "vckitAPIUrl": "http://localhost:3332/v2",
                    "issuer": {
                        "id": "did:web:example.com",
                        "otherIdentifier": [{"id": "abn-1"}]
                    }
                },
                "digitalFacilityRecord": {
                    "context": ["https://test.uncefact.org/vocabulary/untp/dfr/0.5.0/"],
                    "renderTemplate": [
                        {"template": "<p>old</p>", "@type": "WebRenderingTemplate2022"},
                        {"template": "<p>old</p>", "@type": "X", "type": "WebRenderingTemplate2022"}
                    ]
                },
                "storage": {"url": "http://localhost:3334/v1/documents", "params": {"bucket": "b"}},
                "dlr": {
                    "dlrAPIUrl": "http://localhost:3000",
                    "linkRegisterPath": "/api/resolver",
                    "namespace": "ns"
                }
            }
        ]
    })
}

pub fn feature(name: &str, components: Vec<Value>, services: Vec<Value>) -> Value {
    json!({
        "name": name,
        "id": name.to_lowercase().replace(' ', "-"),
        "components": components,
        "services": services
    })
}

/// Single-app document holding `features`
pub fn document(features: Vec<Value>) -> Value {
    json!({
        "name": "Test Config",
        "apps": [
            {"name": "App", "features": features}
        ]
    })
}
