//! MXC request signing
//!
//! Public requests carry their parameters as a URL-encoded query. Private
//! requests carry the raw sorted query followed by
//! `sign = md5_hex(query + "&api_secret=" + secret)`.

use std::collections::{BTreeMap, HashMap};

use crate::errors::{CcxtError, CcxtResult};
use crate::types::{Api, Params, SignedRequest};
use crate::utils::crypto::md5_hex;

/// Default API host.
pub const DEFAULT_HOSTNAME: &str = "www.mxc.ceo";

/// Builds signed requests. Holds the API base URLs and credentials only.
#[derive(Clone)]
pub struct Signer {
    public_url: String,
    private_url: String,
    api_key: Option<String>,
    secret: Option<String>,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("public_url", &self.public_url)
            .field("private_url", &self.private_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Signer {
    pub fn new(hostname: Option<&str>, api_key: Option<&str>, secret: Option<&str>) -> Self {
        let host = hostname.unwrap_or(DEFAULT_HOSTNAME);
        Self {
            public_url: format!("https://{host}/open/api/v1/data/"),
            private_url: format!("https://{host}/open/api/v1/private/"),
            api_key: api_key.map(str::to_string),
            secret: secret.map(str::to_string),
        }
    }

    /// Base URL for an API scope.
    pub fn base_url(&self, api: Api) -> &str {
        match api {
            Api::Public => &self.public_url,
            Api::Private => &self.private_url,
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Fails unless both the API key and the secret are configured.
    pub fn check_required_credentials(&self) -> CcxtResult<(&str, &str)> {
        match (self.api_key.as_deref(), self.secret.as_deref()) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => Ok((key, secret)),
            (None, _) | (Some(""), _) => Err(CcxtError::AuthenticationError {
                message: "mxc requires \"apiKey\" credential".into(),
            }),
            _ => Err(CcxtError::AuthenticationError {
                message: "mxc requires \"secret\" credential".into(),
            }),
        }
    }

    /// Build the request for `path` under the given scope. No I/O.
    pub fn sign(
        &self,
        path: &str,
        api: Api,
        method: &str,
        params: &Params,
    ) -> CcxtResult<SignedRequest> {
        let (path, query) = implode_params(path, params);
        let mut url = format!("{}{}", self.base_url(api), path);

        match api {
            Api::Public => {
                if !query.is_empty() {
                    url.push('?');
                    url.push_str(&urlencode(&query));
                }
            },
            Api::Private => {
                let (_, secret) = self.check_required_credentials()?;
                let auth = rawencode(&query);
                let signature = md5_hex(&format!("{auth}&api_secret={secret}"));
                url.push('?');
                url.push_str(&auth);
                url.push_str("&sign=");
                url.push_str(&signature);
            },
        }

        Ok(SignedRequest {
            url,
            method: method.to_string(),
            headers: HashMap::new(),
            body: None,
        })
    }
}

/// Substitute `{name}` placeholders in `path` and return the unused params.
pub fn implode_params(path: &str, params: &Params) -> (String, BTreeMap<String, String>) {
    let mut out = String::with_capacity(path.len());
    let mut used: Vec<&str> = Vec::new();
    let mut rest = path;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        out.push_str(&rest[..start]);
        match params.get(name) {
            Some(value) => {
                out.push_str(value);
                used.push(name);
            },
            None => out.push_str(&rest[start..=start + len]),
        }
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);

    let query = params
        .iter()
        .filter(|(k, _)| !used.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    (out, query)
}

/// `k=v&...` with keys sorted and both sides percent-encoded.
pub fn urlencode(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `k=v&...` with keys sorted and no escaping.
pub fn rawencode(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// URL with the `sign` parameter cut off, for logging.
pub fn redact_signature(url: &str) -> &str {
    url.split_once("&sign=").map(|(head, _)| head).unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn signer() -> Signer {
        Signer::new(None, Some("key"), Some("secret"))
    }

    #[test]
    fn test_public_query_is_encoded_and_sorted() {
        let request = signer()
            .sign(
                "depth",
                Api::Public,
                "GET",
                &params(&[("market", "MX_ETH"), ("depth", "5")]),
            )
            .unwrap();
        assert_eq!(
            request.url,
            "https://www.mxc.ceo/open/api/v1/data/depth?depth=5&market=MX_ETH"
        );
        assert_eq!(request.method, "GET");
        assert!(request.body.is_none());

        let request = signer()
            .sign("ticker", Api::Public, "GET", &params(&[("q", "a b/c")]))
            .unwrap();
        assert!(request.url.ends_with("ticker?q=a%20b%2Fc"));
    }

    #[test]
    fn test_public_without_params_has_no_query() {
        let request = signer()
            .sign("markets_info", Api::Public, "GET", &Params::new())
            .unwrap();
        assert_eq!(request.url, "https://www.mxc.ceo/open/api/v1/data/markets_info");
    }

    #[test]
    fn test_public_needs_no_credentials() {
        let anonymous = Signer::new(None, None, None);
        assert!(anonymous
            .sign("ticker", Api::Public, "GET", &Params::new())
            .is_ok());
    }

    #[test]
    fn test_path_placeholders_are_removed_from_query() {
        let (path, rest) = implode_params(
            "order/{id}/detail",
            &params(&[("id", "42"), ("market", "MX_ETH")]),
        );
        assert_eq!(path, "order/42/detail");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest.get("market").map(String::as_str), Some("MX_ETH"));

        let (path, rest) = implode_params("order/{missing}", &Params::new());
        assert_eq!(path, "order/{missing}");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_private_signature() {
        let request = signer()
            .sign(
                "account/info",
                Api::Private,
                "GET",
                &params(&[("req_time", "1557729071000"), ("api_key", "key")]),
            )
            .unwrap();
        let auth = "api_key=key&req_time=1557729071000";
        let expected = md5_hex(&format!("{auth}&api_secret=secret"));
        assert_eq!(
            request.url,
            format!("https://www.mxc.ceo/open/api/v1/private/account/info?{auth}&sign={expected}")
        );
    }

    #[test]
    fn test_private_query_is_not_escaped() {
        let request = signer()
            .sign("order", Api::Private, "POST", &params(&[("note", "a b")]))
            .unwrap();
        assert!(request.url.contains("?note=a b&sign="));
    }

    #[test]
    fn test_private_signing_is_deterministic() {
        let forward = params(&[("api_key", "key"), ("market", "MX_ETH"), ("req_time", "1")]);
        let mut reverse = Params::new();
        reverse.insert("req_time".into(), "1".into());
        reverse.insert("market".into(), "MX_ETH".into());
        reverse.insert("api_key".into(), "key".into());

        let a = signer().sign("order", Api::Private, "DELETE", &forward).unwrap();
        let b = signer().sign("order", Api::Private, "DELETE", &reverse).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_private_requires_credentials() {
        let no_key = Signer::new(None, None, Some("secret"));
        let err = no_key
            .sign("account/info", Api::Private, "GET", &Params::new())
            .unwrap_err();
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("apiKey"));

        let no_secret = Signer::new(None, Some("key"), None);
        let err = no_secret
            .sign("account/info", Api::Private, "GET", &Params::new())
            .unwrap_err();
        assert!(err.to_string().contains("secret"));
    }

    #[test]
    fn test_hostname_override() {
        let signer = Signer::new(Some("www.mxc.com"), None, None);
        assert_eq!(signer.base_url(Api::Public), "https://www.mxc.com/open/api/v1/data/");
        assert_eq!(signer.base_url(Api::Private), "https://www.mxc.com/open/api/v1/private/");
    }

    #[test]
    fn test_redact_signature() {
        assert_eq!(redact_signature("https://x/y?a=1&sign=abc"), "https://x/y?a=1");
        assert_eq!(redact_signature("https://x/y?a=1"), "https://x/y?a=1");
    }

    #[test]
    fn test_debug_hides_credentials() {
        let rendered = format!("{:?}", signer());
        assert!(!rendered.contains("secret\""));
        assert!(rendered.contains("***"));
    }
}
