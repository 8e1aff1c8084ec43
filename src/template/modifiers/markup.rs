// ABOUTME: Markup stripping modifiers (comments, CDATA, scripts, styles, links, images, events)
// ABOUTME: Also defines the plain-text composite, built by resolving sibling modifiers by name

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{map_text, ModifierRegistry, Transform, TransformChain};

static COMMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->|/\*.*?\*/").expect("comment pattern is valid"));
static CDATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(?://[\t ]*)?<!\[CDATA\[.*?\]\]>").expect("cdata pattern is valid")
});
static SCRIPTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script pattern is valid")
});
static STYLES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("style pattern is valid")
});
static IMAGES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("image pattern is valid"));
static LINK_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\s+[^>]*>|</a\s*>").expect("link pattern is valid"));
static WHOLE_LINKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\s+[^>]*>.*?</a\s*>").expect("link pattern is valid"));
static NON_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^.*?<body\b[^>]*>|</body\s*>.*$").expect("body pattern is valid")
});
static OPENING_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(<[a-z][a-z0-9]*\s)([^>]*)").expect("tag pattern is valid"));
static EVENT_ATTRIBUTES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s*\bon[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#)
        .expect("event attribute pattern is valid")
});
static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").expect("tag pattern is valid"));

/// Steps of the plain-text composite, applied in this order
pub const PLAINTEXT_STEPS: [&str; 4] = ["stripcdata", "stripscript", "stripstyle", "stripcomments"];

pub fn register(registry: &mut ModifierRegistry) {
    registry.register("stripcomments", |_, _| Some(strip(&COMMENTS)));
    registry.alias("stripcomment", "stripcomments");
    registry.alias("nocomments", "stripcomments");
    registry.alias("nocomment", "stripcomments");
    registry.register("stripcdata", |_, _| Some(strip(&CDATA)));
    registry.register("stripscript", |_, _| Some(strip(&SCRIPTS)));
    registry.register("stripstyle", |_, _| Some(strip(&STYLES)));
    registry.register("stripimage", |_, _| Some(strip(&IMAGES)));
    registry.register("striplink", |_, _| Some(strip(&LINK_TAGS)));
    registry.register("stripwholelink", |_, _| Some(strip(&WHOLE_LINKS)));
    registry.register("stripnonbody", |_, _| Some(strip(&NON_BODY)));
    registry.register("striptags", |_, _| Some(strip(&TAGS)));
    registry.register("striponevent", |_, _| Some(map_text(strip_event_attributes)));

    registry.register("text", |_, registry| Some(plaintext(registry)));
    registry.alias("plaintext", "text");
}

fn strip(pattern: &'static Lazy<Regex>) -> Transform {
    map_text(move |input| pattern.replace_all(input, "").into_owned())
}

fn strip_event_attributes(input: &str) -> String {
    OPENING_TAGS
        .replace_all(input, |caps: &Captures| {
            format!("{}{}", &caps[1], EVENT_ATTRIBUTES.replace_all(&caps[2], ""))
        })
        .into_owned()
}

/// Compose the plain-text cleanup out of whatever the registry resolves for each step
pub fn plaintext(registry: &ModifierRegistry) -> Transform {
    let mut chain = TransformChain::new();
    for step in PLAINTEXT_STEPS {
        chain.push(step, registry.resolve_named(step));
    }
    chain.into_transform()
}
