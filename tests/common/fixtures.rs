//! Fixture sources and collections for an auth/profile API.
//!
//! `clean_*` agree with each other; `drifted_*` introduce one discrepancy of
//! each family against the same type declarations.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const TYPES_TS: &str = r#"
export interface SignInRequestBody {
  email: string;
  password: string;
  stay_logged_in: boolean;
}

export interface SignInResponseBody {
  access_token: string;
  user: {
    id: string;
    email: string;
  };
}

export enum Role {
  Admin = 'admin',
  Member = 'member',
}

export interface ProfileResponseBody {
  id: string;
  email: string;
  role: Role;
  tags: string[];
  nickname?: string;
}
"#;

pub const REQUESTS_TS: &str = r#"import { SignInRequestBody, SignInResponseBody, ProfileResponseBody } from './types';

export async function signIn(body: SignInRequestBody): Promise<SignInResponseBody> {
  const response = await fetch('https://example.com/auth/signin', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  return response.json();
}

export const profile = async (id: string): Promise<ProfileResponseBody> => {
  const response = await fetch(`https://example.com/users/${id}`);
  return response.json();
};
"#;

/// `REQUESTS_TS` plus a health check the contract never mentions (line 18).
pub fn drifted_requests_ts() -> String {
    format!(
        "{REQUESTS_TS}\nexport const health = async () => {{\n  return fetch('https://example.com/health');\n}};\n"
    )
}

fn sign_in_item(request: Value) -> Value {
    json!({
        "name": "Sign in",
        "request": {
            "method": "POST",
            "url": { "raw": "{{baseUrl}}/auth/signin", "path": ["auth", "signin"] },
            "body": { "mode": "raw", "raw": request.to_string() }
        },
        "response": [{
            "code": 200,
            "body": json!({
                "access_token": "abc",
                "user": { "id": "u1", "email": "user@example.com" }
            }).to_string()
        }]
    })
}

fn profile_item(role: &str, nickname: Option<&str>) -> Value {
    let mut body = json!({
        "id": "u1",
        "email": "user@example.com",
        "role": role,
        "tags": ["beta"]
    });
    if let Some(nick) = nickname {
        body["nickname"] = json!(nick);
    }
    json!({
        "name": "Profile",
        "request": { "method": "GET", "url": "{{baseUrl}}/users/:id" },
        "response": [{ "code": 200, "body": body.to_string() }]
    })
}

fn collection(items: Vec<Value>) -> String {
    serde_json::to_string_pretty(&json!({
        "info": { "name": "Example API" },
        "item": items
    }))
    .unwrap()
}

pub fn clean_collection() -> String {
    clean_collection_with_nickname(Some("u"))
}

/// The clean collection, optionally leaving out the optional `nickname`.
pub fn clean_collection_with_nickname(nickname: Option<&str>) -> String {
    collection(vec![
        json!({
            "name": "Auth",
            "item": [sign_in_item(json!({
                "email": "user@example.com",
                "password": "secret",
                "stay_logged_in": true
            }))]
        }),
        profile_item("admin", nickname),
    ])
}

/// Sign-in body renames a field, profile role leaves the enum, and a
/// sessions endpoint exists only in the contract.
pub fn drifted_collection() -> String {
    collection(vec![
        json!({
            "name": "Auth",
            "item": [sign_in_item(json!({
                "email": "user@example.com",
                "password": "secret",
                "remember_me": true
            }))]
        }),
        profile_item("owner", Some("u")),
        json!({
            "name": "End session",
            "request": { "method": "DELETE", "url": "{{baseUrl}}/sessions/:id" }
        }),
    ])
}

/// Files for a project whose code and contract agree.
pub fn clean_project() -> Vec<(&'static str, String)> {
    vec![
        ("src/types.ts", TYPES_TS.to_string()),
        ("src/api.ts", REQUESTS_TS.to_string()),
        ("api.postman.json", clean_collection()),
    ]
}

pub fn drifted_project() -> Vec<(&'static str, String)> {
    vec![
        ("src/types.ts", TYPES_TS.to_string()),
        ("src/api.ts", drifted_requests_ts()),
        ("api.postman.json", drifted_collection()),
    ]
}
