//! Deterministic feature extraction from a page snapshot
//!
//! Extraction is a pure function over the snapshot: identical input always
//! yields an identical feature map. The one network-dependent signal
//! (`statistical_report`) lives in [`super::report`] and is merged in by the
//! analysis engine, keeping this module free of I/O.
//!
//! Failure policy: a signal that cannot be computed degrades to its neutral
//! value and extraction continues; nothing in here returns an error per
//! snapshot.

use regex::Regex;
use url::Url;

use super::lists;
use super::types::RawFeatureMap;
use crate::error::{PhishError, Result};
use crate::snapshot::{FormSignal, PageSnapshot};

/// Characters URL words are segmented on; part of the feature definition.
const WORD_SEPARATORS: &[char] = &['-', '.', '/', '?', '=', '@', '&', '%', ':', '_'];

/// Feature extractor with its fixed patterns compiled once at startup.
pub struct FeatureExtractor {
    ip_v4: Regex,
    ip_hex: Regex,
    ip_v6: Regex,
    ip_seven_hex: Regex,
    port: Regex,
    abnormal_subdomain: Regex,
    prefix_suffix: Regex,
    right_clic: Regex,
    identifier_input: Regex,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| PhishError::Config(format!("bad pattern {pattern:?}: {e}")))
}

impl FeatureExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ip_v4: compile(r"(\d{1,3}\.){3}\d{1,3}/")?,
            ip_hex: compile(
                r"(0x[0-9a-fA-F]{1,2})\.(0x[0-9a-fA-F]{1,2})\.(0x[0-9a-fA-F]{1,2})\.(0x[0-9a-fA-F]{1,2})/",
            )?,
            ip_v6: compile(r"([a-fA-F0-9]{1,4}:){7}[a-fA-F0-9]{1,4}")?,
            ip_seven_hex: compile(r"[0-9a-fA-F]{7}")?,
            port: compile(
                r"^[a-z][a-z0-9+\-.]*://([a-z0-9\-._~%!$&'()*+,;=]+@)?([a-z0-9\-._~%]+|\[[a-z0-9\-._~%!$&'()*+,;=:]+\]):([0-9]+)",
            )?,
            abnormal_subdomain: compile(r"(http[s]?://(w[w]?|\d))([w]?(\d|-))")?,
            prefix_suffix: compile(r"https?://[^\-]+-[^\-]+/")?,
            right_clic: compile(r"event\.button\s*==\s*2")?,
            identifier_input: compile(
                r"(?i)email|user|login|id|phone|tel|mobile|account|account_no|username|userid",
            )?,
        })
    }

    /// Extract every snapshot-local feature.
    pub fn extract(&self, snapshot: &PageSnapshot) -> RawFeatureMap {
        let parts = UrlParts::from_snapshot(snapshot);
        let mut features = RawFeatureMap::new();

        self.lexical_features(&mut features, &parts);
        self.word_features(&mut features, &parts);
        self.dictionary_features(&mut features, &parts);
        self.dom_features(&mut features, snapshot, &parts);
        redirection_features(&mut features, snapshot);

        features
    }

    fn lexical_features(&self, features: &mut RawFeatureMap, parts: &UrlParts) {
        let url = &parts.url;

        features.insert("length_url", url.len() as f32);
        features.insert("length_hostname", parts.host.len() as f32);

        let has_ip = self.ip_v4.is_match(url)
            || self.ip_hex.is_match(url)
            || self.ip_v6.is_match(url)
            || self.ip_seven_hex.is_match(url);
        features.insert("ip", has_ip as u32 as f32);

        // Dot count is taken over the hostname, every other count over the URL.
        features.insert("nb_dots", count(&parts.host, '.'));
        features.insert("nb_hyphens", count(url, '-'));
        features.insert("nb_at", count(url, '@'));
        features.insert("nb_qm", count(url, '?'));
        features.insert("nb_and", count(url, '&'));
        features.insert("nb_or", count(url, '|'));
        features.insert("nb_eq", count(url, '='));
        features.insert("nb_underscore", count(url, '_'));
        features.insert("nb_tilde", if url.contains('~') { 1.0 } else { 0.0 });
        features.insert("nb_percent", count(url, '%'));
        features.insert("nb_slash", count(url, '/'));
        features.insert("nb_star", count(url, '*'));
        features.insert("nb_colon", count(url, ':'));
        features.insert("nb_comma", count(url, ','));
        features.insert("nb_semicolumn", count(url, ';'));
        features.insert("nb_dollar", count(url, '$'));
        features.insert(
            "nb_space",
            (url.matches(' ').count() + url.matches("%20").count()) as f32,
        );

        // Double-slash past the scheme separator signals an embedded URL.
        let last_dslash = url.match_indices("//").last().map(|(i, _)| i);
        features.insert(
            "nb_dslash",
            match last_dslash {
                Some(i) if i > 6 => 1.0,
                _ => 0.0,
            },
        );

        features.insert("http_in_path", parts.path_lower.matches("http").count() as f32);
        features.insert(
            "https_token",
            if url.starts_with("https://") { 0.0 } else { 1.0 },
        );

        let digits = |s: &str| s.chars().filter(|c| c.is_ascii_digit()).count() as f32;
        features.insert("ratio_digits_url", digits(url) / url.len().max(1) as f32);
        features.insert(
            "ratio_digits_host",
            digits(&parts.host) / parts.host.len().max(1) as f32,
        );

        let punycode =
            url.starts_with("http://xn--") || url.starts_with("https://xn--");
        features.insert("punycode", punycode as u32 as f32);
        features.insert("port", self.port.is_match(url) as u32 as f32);

        features.insert(
            "tld_in_path",
            (!parts.tld.is_empty() && parts.path_lower.contains(&parts.tld)) as u32 as f32,
        );
        features.insert(
            "tld_in_subdomain",
            (!parts.tld.is_empty() && parts.subdomain.contains(&parts.tld)) as u32 as f32,
        );
        features.insert(
            "abnormal_subdomain",
            self.abnormal_subdomain.is_match(url) as u32 as f32,
        );

        // Bucketed to {1, 2, 3+} by dot count over the whole URL.
        let dot_count = url.matches('.').count();
        features.insert(
            "nb_subdomains",
            match dot_count {
                1 => 1.0,
                2 => 2.0,
                _ => 3.0,
            },
        );

        features.insert(
            "prefix_suffix",
            self.prefix_suffix.is_match(url) as u32 as f32,
        );
        features.insert(
            "shortening_service",
            lists::SHORTENER_HOSTS.contains(&parts.host_lower.as_str()) as u32 as f32,
        );
        features.insert(
            "path_extension",
            parts.path.ends_with(".txt") as u32 as f32,
        );
    }

    fn word_features(&self, features: &mut RawFeatureMap, parts: &UrlParts) {
        let url_words = &parts.url_words;
        let host_words = &parts.host_words;
        let path_words = &parts.path_words;

        features.insert("length_words_raw", url_words.len() as f32);

        let www = url_words
            .iter()
            .filter(|w| w.to_lowercase().contains("www"))
            .count();
        features.insert("nb_www", www as f32);
        let com = url_words
            .iter()
            .filter(|w| w.to_lowercase().contains("com"))
            .count();
        features.insert("nb_com", com as f32);

        features.insert("char_repeat", char_repeat(url_words) as f32);

        let lengths = |words: &[String]| words.iter().map(|w| w.len()).collect::<Vec<_>>();
        let url_lens = lengths(url_words);
        let host_lens = lengths(host_words);
        let path_lens = lengths(path_words);

        features.insert("shortest_words_raw", min_len(&url_lens));
        features.insert("shortest_word_host", min_len(&host_lens));
        features.insert("shortest_word_path", min_len(&path_lens));
        features.insert("longest_words_raw", max_len(&url_lens));
        features.insert("longest_word_host", max_len(&host_lens));
        features.insert("longest_word_path", max_len(&path_lens));
        features.insert("avg_words_raw", avg_len(&url_lens));
        features.insert("avg_word_host", avg_len(&host_lens));
        features.insert("avg_word_path", avg_len(&path_lens));
    }

    fn dictionary_features(&self, features: &mut RawFeatureMap, parts: &UrlParts) {
        let hints = lists::PHISH_HINT_KEYWORDS
            .iter()
            .filter(|k| parts.url_lower.contains(*k))
            .count();
        features.insert("phish_hints", hints as f32);

        let domain = parts.domain_label.as_str();
        features.insert(
            "domain_in_brand",
            lists::BRAND_KEYWORDS.contains(&domain) as u32 as f32,
        );

        // A brand counts only as a dot-delimited token, and never when the
        // domain label itself is that brand.
        let subdomain_dotted = format!(".{}.", parts.subdomain);
        let brand_in_subdomain = lists::BRAND_KEYWORDS.iter().any(|brand| {
            subdomain_dotted.contains(&format!(".{}.", brand)) && domain != *brand
        });
        features.insert("brand_in_subdomain", brand_in_subdomain as u32 as f32);

        let path_dotted = format!(".{}.", parts.path_lower);
        let brand_in_path = lists::BRAND_KEYWORDS.iter().any(|brand| {
            path_dotted.contains(&format!(".{}.", brand)) && domain != *brand
        });
        features.insert("brand_in_path", brand_in_path as u32 as f32);

        features.insert(
            "suspecious_tld",
            lists::SUSPICIOUS_TLDS.contains(&parts.tld.as_str()) as u32 as f32,
        );
    }

    fn dom_features(
        &self,
        features: &mut RawFeatureMap,
        snapshot: &PageSnapshot,
        parts: &UrlParts,
    ) {
        let dom = &snapshot.dom;

        let ext_css = dom
            .stylesheets
            .iter()
            .filter(|href| {
                resolve_host(&parts.url, href)
                    .map(|host| host != parts.host_lower)
                    .unwrap_or(false)
            })
            .count();
        features.insert("nb_extCSS", ext_css as f32);

        let login_form = dom.forms.iter().any(|form| self.is_login_form(form));
        features.insert("login_form", login_form as u32 as f32);

        let submit_email = dom.forms.iter().any(|form| {
            let action = form.action.to_lowercase();
            action.contains("mailto:") || action.contains("mail()")
        });
        features.insert("submit_email", submit_email as u32 as f32);

        let sfh = dom.forms.iter().any(|form| {
            let action = form.action.trim();
            action.is_empty()
                || action == "#"
                || action == "about:blank"
                || action.to_lowercase().starts_with("javascript:")
        });
        features.insert("sfh", sfh as u32 as f32);

        // All three zero-size signals are required before an iframe counts as
        // hidden; a zero-border embed alone is not suspicious.
        let hidden_iframe = dom.iframes.iter().any(|iframe| {
            let style_packed: String =
                iframe.style.chars().filter(|c| !c.is_whitespace()).collect();
            iframe.width == "0"
                && iframe.height == "0"
                && (iframe.frameborder == "0"
                    || iframe.border == "0"
                    || style_packed.contains("border:none"))
        });
        features.insert("iframe", hidden_iframe as u32 as f32);

        let body_text_lower = dom.body_text.to_lowercase();
        let popup = body_text_lower.contains("prompt(")
            || dom
                .scripts
                .iter()
                .any(|s| s.to_lowercase().contains("prompt("));
        features.insert("popup_window", popup as u32 as f32);

        let html_packed: String = dom
            .body_html
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let onmouseover = html_packed.contains("onmouseover=\"window.status=")
            || html_packed.contains("onmouseover='window.status=");
        features.insert("onmouseover", onmouseover as u32 as f32);

        features.insert(
            "right_clic",
            self.right_clic.is_match(&dom.body_html) as u32 as f32,
        );

        features.insert(
            "empty_title",
            dom.title.trim().is_empty() as u32 as f32,
        );

        // Inverted flag: 0 when the domain label appears in the title.
        let title_lower = dom.title.to_lowercase();
        features.insert(
            "domain_in_title",
            if title_lower.contains(&parts.domain_label) { 0.0 } else { 1.0 },
        );

        features.insert(
            "domain_with_copyright",
            domain_with_copyright(&dom.body_text, &parts.domain_label),
        );
    }

    fn is_login_form(&self, form: &FormSignal) -> bool {
        let mut has_password = false;
        let mut has_identifier = false;

        for input in &form.inputs {
            let kind = input.kind.to_lowercase();
            if kind == "password" {
                has_password = true;
            }
            if kind == "email"
                || self.identifier_input.is_match(&input.name)
                || self.identifier_input.is_match(&input.placeholder)
                || self.identifier_input.is_match(&input.id)
            {
                has_identifier = true;
            }
        }

        has_password && has_identifier
    }
}

/// Decomposed URL pieces shared by the feature groups.
struct UrlParts {
    url: String,
    url_lower: String,
    host: String,
    host_lower: String,
    path: String,
    path_lower: String,
    subdomain: String,
    domain_label: String,
    tld: String,
    url_words: Vec<String>,
    host_words: Vec<String>,
    path_words: Vec<String>,
}

impl UrlParts {
    fn from_snapshot(snapshot: &PageSnapshot) -> Self {
        let url = snapshot.url.clone();
        let host = snapshot.hostname.clone();
        let host_lower = host.to_lowercase();

        let host_parts: Vec<&str> = host_lower.split('.').collect();
        let subdomain = if host_parts.len() > 2 {
            host_parts[..host_parts.len() - 2].join(".")
        } else {
            String::new()
        };
        let domain_label = if host_parts.len() > 1 {
            host_parts[host_parts.len() - 2].to_string()
        } else {
            host_lower.clone()
        };
        let tld = host_parts.last().map(|s| s.to_string()).unwrap_or_default();

        let path = snapshot.pathname.clone();
        let path_and_query = format!("{}{}", snapshot.pathname, snapshot.query);

        // Concatenation order matters: the model was trained on
        // domain words, then path words, then subdomain words.
        let domain_words = split_words(&domain_label);
        let subdomain_words = split_words(&subdomain);
        let path_words = split_words(&path_and_query);

        let mut url_words = domain_words.clone();
        url_words.extend(path_words.iter().cloned());
        url_words.extend(subdomain_words.iter().cloned());

        let mut host_words = domain_words;
        host_words.extend(subdomain_words);

        Self {
            url_lower: url.to_lowercase(),
            path_lower: path.to_lowercase(),
            url,
            host,
            host_lower,
            path,
            subdomain,
            domain_label,
            tld,
            url_words,
            host_words,
            path_words,
        }
    }
}

fn split_words(s: &str) -> Vec<String> {
    s.split(WORD_SEPARATORS)
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

fn count(s: &str, c: char) -> f32 {
    s.matches(c).count() as f32
}

fn min_len(lengths: &[usize]) -> f32 {
    lengths.iter().min().copied().unwrap_or(0) as f32
}

fn max_len(lengths: &[usize]) -> f32 {
    lengths.iter().max().copied().unwrap_or(0) as f32
}

fn avg_len(lengths: &[usize]) -> f32 {
    if lengths.is_empty() {
        return 0.0;
    }
    lengths.iter().sum::<usize>() as f32 / lengths.len() as f32
}

/// Count contiguous substrings of length 2..=5 made of a single repeated
/// character, summed over all words.
fn char_repeat(words: &[String]) -> usize {
    let mut total = 0;
    for word in words {
        let chars: Vec<char> = word.chars().collect();
        for len in 2..=5 {
            if chars.len() < len {
                continue;
            }
            total += chars
                .windows(len)
                .filter(|win| win.iter().all(|&c| c == win[0]))
                .count();
        }
    }
    total
}

fn resolve_host(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    let resolved = base.join(href).ok()?;
    resolved.host_str().map(|h| h.to_lowercase())
}

/// 1 when a copyright/trademark glyph exists but the domain label is absent
/// from the ±50 characters around the first one; 0 otherwise. A page without
/// any such glyph is treated as normal.
fn domain_with_copyright(body_text: &str, domain_label: &str) -> f32 {
    let chars: Vec<char> = body_text.chars().collect();
    let position = chars
        .iter()
        .position(|&c| c == '\u{00A9}' || c == '\u{2122}' || c == '\u{00AE}');

    match position {
        None => 0.0,
        Some(idx) => {
            let start = idx.saturating_sub(50);
            let end = (idx + 50).min(chars.len());
            let context: String = chars[start..end].iter().collect::<String>().to_lowercase();
            if context.contains(domain_label) {
                0.0
            } else {
                1.0
            }
        }
    }
}

fn redirection_features(features: &mut RawFeatureMap, snapshot: &PageSnapshot) {
    let total = snapshot.nb_redirection as f32;
    let external = snapshot.nb_external_redirection as f32;

    features.insert("nb_redirection", total);
    features.insert("nb_external_redirection", external);

    if total > 0.0 {
        features.insert("ratio_intRedirection", (total - external) / total);
        features.insert("ratio_extRedirection", external / total);
    } else {
        features.insert("ratio_intRedirection", 0.0);
        features.insert("ratio_extRedirection", 0.0);
    }
}
