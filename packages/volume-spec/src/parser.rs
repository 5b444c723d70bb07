//! Parser for `username:key@share[:/target]` volume specifications.

use std::fmt;

use percent_encoding::percent_decode_str;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FormatIssue, ParseError};

/// Parent directory for targets a specification leaves out.
pub const DEFAULT_TARGET_ROOT: &str = "/run/volumes";

/// Stands in for `/` inside the userinfo so the URL parser does not end the
/// authority at a slash in the key.
const KEY_SLASH_PLACEHOLDER: &str = "_";

/// Scheme prepended to the `//authority/path` form so it parses as a URL.
const SPEC_SCHEME: &str = "azurefile";

/// A volume specification split into its fields.
///
/// `username`, `key` and `share` are never empty. The key is left out of the
/// `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ParsedVolume {
    name: String,
    username: String,
    key: String,
    share: String,
    target: String,
}

impl ParsedVolume {
    /// Parse a specification, giving the volume the assigned `name`.
    ///
    /// # Syntax
    ///
    /// - `username:key@share` mounts at `/run/volumes/<share>`
    /// - `username:key@share:/target` mounts at `/target`
    /// - `/` in the key is allowed; `_` in the key is read back as `/`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use azvol_spec::ParsedVolume;
    ///
    /// let volume = ParsedVolume::parse("volume-0", "user:ab/cd@share:/data").unwrap();
    /// assert_eq!(volume.key(), "ab/cd");
    /// assert_eq!(volume.target(), "/data");
    ///
    /// let volume = ParsedVolume::parse("volume-1", "user:key@share").unwrap();
    /// assert_eq!(volume.target(), "/run/volumes/share");
    /// ```
    pub fn parse(name: impl Into<String>, spec: &str) -> Result<Self, ParseError> {
        let name = name.into();

        let (username, password, url) = match volume_url(spec)? {
            Authority::Url(url) => (
                decode_component(url.username()),
                url.password().map(decode_component),
                Some(url),
            ),
            Authority::EmptyHost { userinfo } => {
                let (username, password) = split_credentials(&userinfo);
                (
                    decode_component(username),
                    password.map(decode_component),
                    None,
                )
            }
        };

        if username.is_empty() {
            return Err(ParseError::MissingUsername {
                spec: spec.to_string(),
            });
        }

        let key = match password {
            Some(password) if !password.is_empty() => unescape_key(&password),
            _ => {
                return Err(ParseError::MissingKey {
                    spec: spec.to_string(),
                })
            }
        };

        let share = url
            .as_ref()
            .and_then(Url::host_str)
            .map(decode_component)
            .unwrap_or_default();
        if share.is_empty() {
            return Err(ParseError::MissingShare {
                spec: spec.to_string(),
            });
        }
        let path = url
            .as_ref()
            .map(|url| decode_component(url.path()))
            .unwrap_or_default();

        // Not a filesystem join: the target is a path inside the container.
        let target = match path {
            path if path.is_empty() => format!("{}/{}", DEFAULT_TARGET_ROOT, share),
            path => path,
        };

        if raw_key(spec).is_some_and(|key| key.contains(KEY_SLASH_PLACEHOLDER)) {
            warn!(
                volume = %name,
                "storage key contains '{}', which is read back as '/'",
                KEY_SLASH_PLACEHOLDER
            );
        }

        debug!(
            volume = %name,
            username = %username,
            share = %share,
            target = %target,
            "parsed volume specification"
        );

        Ok(ParsedVolume {
            name,
            username,
            key,
            share,
            target,
        })
    }

    /// The assigned volume name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage account name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Storage account key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// File share name.
    pub fn share(&self) -> &str {
        &self.share
    }

    /// Mount path inside the service container.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Debug for ParsedVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedVolume")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .field("share", &self.share)
            .field("target", &self.target)
            .finish()
    }
}

/// What the URL parser made of a specification's authority.
enum Authority {
    Url(Url),
    /// The host was empty, which the URL parser rejects outright. Keeps the
    /// userinfo so the credentials can still be checked first.
    EmptyHost { userinfo: String },
}

/// Build the URL for a specification.
///
/// The second of exactly two colons is the one between share and target; it
/// is dropped so the target parses as the URL path.
fn volume_url(spec: &str) -> Result<Authority, ParseError> {
    let mut authority = format!("//{}", escape_key_slashes(spec)?);

    let count = authority.matches(':').count();
    if count > 2 {
        return Err(ParseError::invalid_format(
            spec,
            FormatIssue::TooManyColons { count },
        ));
    }
    if count == 2 {
        authority = drop_second_colon(&authority);
    }

    match Url::parse(&format!("{}:{}", SPEC_SCHEME, authority)) {
        Ok(url) => Ok(Authority::Url(url)),
        Err(url::ParseError::EmptyHost) => {
            let userinfo = split_userinfo(&authority["//".len()..])
                .map(|(userinfo, _)| userinfo.to_string())
                .unwrap_or_default();
            Ok(Authority::EmptyHost { userinfo })
        }
        Err(err) => Err(ParseError::invalid_format(spec, err)),
    }
}

/// Split a specification into its userinfo and the rest, at the same `@` the
/// URL parser uses: the last one before the authority ends.
pub(crate) fn split_userinfo(spec: &str) -> Option<(&str, &str)> {
    let first_at = spec.find('@')?;
    let authority_end = spec[first_at..]
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .map_or(spec.len(), |offset| first_at + offset);
    let last_at = spec[..authority_end].rfind('@')?;
    Some((&spec[..last_at], &spec[last_at + 1..]))
}

/// Username and password of a userinfo; the first `:` separates them.
fn split_credentials(userinfo: &str) -> (&str, Option<&str>) {
    match userinfo.split_once(':') {
        Some((username, password)) => (username, Some(password)),
        None => (userinfo, None),
    }
}

/// Replace `/` with the placeholder in everything before the first `@`.
fn escape_key_slashes(spec: &str) -> Result<String, ParseError> {
    let (userinfo, rest) = spec
        .split_once('@')
        .ok_or_else(|| ParseError::invalid_format(spec, FormatIssue::MissingAt))?;

    Ok(format!(
        "{}@{}",
        userinfo.replace('/', KEY_SLASH_PLACEHOLDER),
        rest
    ))
}

fn unescape_key(key: &str) -> String {
    key.replace(KEY_SLASH_PLACEHOLDER, "/")
}

fn drop_second_colon(s: &str) -> String {
    let mut tokens = s.splitn(3, ':');
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(head), Some(middle), Some(tail)) => format!("{}:{}{}", head, middle, tail),
        _ => s.to_string(),
    }
}

/// The key as written, before any escaping.
fn raw_key(spec: &str) -> Option<&str> {
    let (userinfo, _) = split_userinfo(spec)?;
    split_credentials(userinfo).1
}

fn decode_component(component: &str) -> String {
    percent_decode_str(component)
        .decode_utf8_lossy()
        .into_owned()
}
