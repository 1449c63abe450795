//! Assembly of the node cache admin page.
//!
//! The page carries two independent forms. The "headers" form is
//! permission-gated: a denied capability omits the form from the page
//! entirely (read-only view) instead of raising an error. The "clear"
//! form only carries the recursive confirmation checkbox and is not
//! gated.

use cachetier_core::{
    CacheTarget, EffectivePolicy, HEADER_MAX_AGE, HEADER_S_MAXAGE, Locale, Node, NodeRepository,
    Site, resolve_effective_policy,
    time::{duration_label_key, nearest_bucket},
};

use crate::error::AdminError;
use crate::forms::{Field, Form, FormValues, ValidationErrors};
use crate::translate::Translator;
use crate::update::{FIELD_CACHE_TARGET, FIELD_MAX_AGE, FIELD_SHARED_MAX_AGE, headers_form};

/// What the current operator is allowed to do.
///
/// An explicit capability check composed into page assembly; denial
/// yields a `None` form view, never an error.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    /// May edit the cache policy ("headers" form).
    pub edit_headers: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities { edit_headers: true }
    }
}

/// The declarative "clear" form triggering invalidation.
pub fn clear_form() -> Form {
    Form::builder("clear")
        .field(Field::checkbox("recursive", "label.confirm.cache.clear.recursive"))
        .build()
}

/// The assembled admin page for a node's cache settings.
#[derive(Debug, Clone)]
pub struct NodeCachePage {
    /// The site the node belongs to.
    pub site: Site,
    /// The node being edited.
    pub node: Node,
    /// The active locale.
    pub locale: Locale,
    /// All locales offered in the switcher.
    pub locales: Vec<Locale>,
    /// The policy form; `None` when the operator may not edit headers.
    pub headers_form: Option<crate::forms::FormView>,
    /// The invalidation form.
    pub clear_form: crate::forms::FormView,
    /// Human-readable summary of the inherited policy, present when the
    /// node's own target is `inherit`.
    pub inherited: Option<String>,
    /// Redirect target after a successful submission.
    pub referer: Option<String>,
    /// Confirmation banner, when a previous submission succeeded.
    pub message: Option<String>,
}

/// Form values prefilled from the node's current policy.
///
/// Only the duration fields the target makes relevant are filled, and
/// persisted values that match no curated bucket (end-of-day collapses
/// to plain seconds) snap to the closest one, so resubmitting the
/// prefilled form always validates.
pub fn prefill(node: &Node, locale: &Locale) -> FormValues {
    let mut values = FormValues::new();
    let target = node.cache_target(locale);
    values.set(FIELD_CACHE_TARGET, target.as_str());
    if target == CacheTarget::All {
        if let Some(seconds) = node.header_seconds(locale, HEADER_MAX_AGE) {
            values.set(FIELD_MAX_AGE, nearest_bucket(seconds).to_string());
        }
    }
    if matches!(target, CacheTarget::Intermediate | CacheTarget::All) {
        if let Some(seconds) = node.header_seconds(locale, HEADER_S_MAXAGE) {
            values.set(FIELD_SHARED_MAX_AGE, nearest_bucket(seconds).to_string());
        }
    }
    values
}

fn duration_label(translator: &Translator, locale: &Locale, seconds: u64) -> String {
    match duration_label_key(seconds) {
        Some(key) => translator.translate(locale, &key),
        None => format!("{seconds} s"),
    }
}

/// Compose the human-readable summary of an inherited policy: the target
/// label plus the duration labels the target makes applicable.
pub fn inherited_summary(
    translator: &Translator,
    locale: &Locale,
    policy: Option<&EffectivePolicy>,
) -> String {
    let Some(policy) = policy else {
        return translator.translate(locale, "label.cache.inherited.none");
    };
    let mut parts = vec![translator.translate(locale, &policy.target.label_key())];
    if let Some(seconds) = policy.max_age {
        parts.push(format!(
            "max-age: {}",
            duration_label(translator, locale, seconds)
        ));
    }
    if let Some(seconds) = policy.shared_max_age {
        parts.push(format!(
            "s-maxage: {}",
            duration_label(translator, locale, seconds)
        ));
    }
    parts.join(", ")
}

/// Assemble the page for a node.
///
/// `submitted`/`errors` carry a failed submission to re-render with the
/// operator's input preserved; pass `None` to render the node's current
/// state.
#[allow(clippy::too_many_arguments)]
pub async fn assemble_page(
    repo: &dyn NodeRepository,
    translator: &Translator,
    site: &Site,
    node: &Node,
    locale: &Locale,
    locales: Vec<Locale>,
    capabilities: Capabilities,
    submitted: Option<&FormValues>,
    errors: Option<&ValidationErrors>,
    referer: Option<String>,
    message: Option<String>,
) -> Result<NodeCachePage, AdminError> {
    let prefilled;
    let values = match submitted {
        Some(values) => values,
        None => {
            prefilled = prefill(node, locale);
            &prefilled
        }
    };
    let no_errors = ValidationErrors::new();
    let errors = errors.unwrap_or(&no_errors);

    let inherited = if node.cache_target(locale) == CacheTarget::Inherit {
        let policy =
            resolve_effective_policy(repo, site.id(), site.revision(), node, locale).await?;
        Some(inherited_summary(translator, locale, policy.as_ref()))
    } else {
        None
    };

    let headers_form = capabilities
        .edit_headers
        .then(|| headers_form().view(values, errors, translator, locale));
    let clear_view = clear_form().view(&FormValues::new(), &no_errors, translator, locale);

    Ok(NodeCachePage {
        site: site.clone(),
        node: node.clone(),
        locale: locale.clone(),
        locales,
        headers_form,
        clear_form: clear_view,
        inherited,
        referer,
        message,
    })
}
