//! Checkout-page heuristics: does a URL look like a checkout, and what is
//! the first price mentioned in a blob of page text.

use std::sync::LazyLock;

use regex::Regex;

static CHECKOUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)checkout|cart|basket|buy").unwrap());

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([0-9]+(?:\.[0-9]{2})?)").unwrap());

pub fn is_checkout_url(url: &str) -> bool {
    CHECKOUT_RE.is_match(url)
}

/// First `$NN` or `$NN.NN` occurrence in `text`, if any.
pub fn find_price(text: &str) -> Option<f64> {
    PRICE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
