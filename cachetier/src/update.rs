//! The validate-and-persist policy update.
//!
//! The tiered target controls which duration fields are read and which
//! header overrides are asserted back onto the node:
//!
//! | target       | `max-age`            | `s-maxage`           |
//! |--------------|----------------------|----------------------|
//! | inherit      | cleared (unset)      | cleared (unset)      |
//! | none         | explicit empty       | explicit empty       |
//! | intermediate | forced `0`           | submitted value      |
//! | all          | submitted value      | submitted value      |
//!
//! `Expires` is unconditionally reset to the fixed historical sentinel.
//! Mutation happens on a clone, only after validation passed; a failed
//! validation never touches the node or reaches the repository.

use chrono::Utc;

use cachetier_core::{
    CacheTarget, EXPIRES_SENTINEL, HEADER_EXPIRES, HEADER_MAX_AGE, HEADER_S_MAXAGE, HeaderSetting,
    Locale, Node, NodeRepository, PROPERTY_CACHE_TARGET, Site, TIME_OPTIONS, TimeOption,
};

use crate::error::AdminError;
use crate::forms::{Field, FieldOption, Form, FormValues, ValidationErrors};
use crate::translate::Translator;

/// Field carrying the tiered target.
pub const FIELD_CACHE_TARGET: &str = "cacheTarget";
/// Field carrying the browser cache duration.
pub const FIELD_MAX_AGE: &str = "maxAge";
/// Field carrying the shared cache duration.
pub const FIELD_SHARED_MAX_AGE: &str = "sharedMaxAge";

fn time_options() -> Vec<FieldOption> {
    TIME_OPTIONS
        .iter()
        .map(|option| FieldOption {
            value: option.form_value(),
            label_key: option.label_key(),
        })
        .collect()
}

/// The declarative "headers" form editing the cache policy.
pub fn headers_form() -> Form {
    let targets = CacheTarget::VALUES
        .iter()
        .map(|target| FieldOption {
            value: target.as_str().to_string(),
            label_key: target.label_key(),
        })
        .collect();

    Form::builder("headers")
        .field(
            Field::select(FIELD_CACHE_TARGET, "label.cache.target", targets)
                .description("label.cache.target.description")
                .required(),
        )
        .field(
            Field::select(FIELD_MAX_AGE, "label.age.max", time_options())
                .description("label.age.max.description"),
        )
        .field(
            Field::select(FIELD_SHARED_MAX_AGE, "label.age.max.shared", time_options())
                .description("label.age.max.shared.description"),
        )
        .build()
}

/// Parse a duration field against the curated option list, attaching
/// `required`/unknown-option errors to the originating field.
fn time_field(
    values: &FormValues,
    name: &str,
    errors: &mut ValidationErrors,
    translator: &Translator,
    locale: &Locale,
) -> Option<TimeOption> {
    match values.present(name) {
        None => {
            errors.add(name, translator.translate(locale, "error.validation.required"));
            None
        }
        Some(raw) => match TimeOption::parse(raw) {
            Some(option) => Some(option),
            None => {
                errors.add(
                    name,
                    translator.translate(locale, "error.validation.option.unknown"),
                );
                None
            }
        },
    }
}

/// Validate a policy submission and persist it onto the node.
///
/// On success returns the saved node (new revision), with the change
/// recorded as `Set cache properties for <node name>`. On validation
/// failure returns [`AdminError::Validation`] carrying the per-field
/// messages; the node is left untouched and nothing is saved.
pub async fn update_policy(
    repo: &dyn NodeRepository,
    site: &Site,
    node: &Node,
    locale: &Locale,
    values: &FormValues,
    translator: &Translator,
) -> Result<Node, AdminError> {
    let form = headers_form();
    let mut errors = match form.validate(values, translator, locale) {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    let target = match values.present(FIELD_CACHE_TARGET) {
        // `required` was already attached by the form validators.
        None => None,
        Some(raw) => match raw.parse::<CacheTarget>() {
            Ok(target) => Some(target),
            Err(_) => {
                errors.add(
                    FIELD_CACHE_TARGET,
                    translator.translate(locale, "error.validation.option.unknown"),
                );
                None
            }
        },
    };

    // Duration fields are only read (and required) when the target
    // makes them relevant.
    let max_age = match target {
        Some(CacheTarget::All) => {
            time_field(values, FIELD_MAX_AGE, &mut errors, translator, locale)
        }
        _ => None,
    };
    let shared_max_age = match target {
        Some(CacheTarget::Intermediate) | Some(CacheTarget::All) => {
            time_field(values, FIELD_SHARED_MAX_AGE, &mut errors, translator, locale)
        }
        _ => None,
    };

    if !errors.is_empty() {
        tracing::debug!(node = %node.id(), locale = %locale, "policy update rejected by validation");
        return Err(AdminError::Validation(errors));
    }
    let target = target.expect("target is present when validation passed");

    let now = Utc::now();
    let mut updated = node.clone();
    updated.set_property(locale, PROPERTY_CACHE_TARGET, target.as_str());
    match target {
        CacheTarget::Inherit => {
            updated.set_header(locale, HEADER_MAX_AGE, HeaderSetting::Unset);
            updated.set_header(locale, HEADER_S_MAXAGE, HeaderSetting::Unset);
        }
        CacheTarget::None => {
            updated.set_header(locale, HEADER_MAX_AGE, HeaderSetting::Empty);
            updated.set_header(locale, HEADER_S_MAXAGE, HeaderSetting::Empty);
        }
        CacheTarget::Intermediate => {
            updated.set_header(locale, HEADER_MAX_AGE, HeaderSetting::seconds(0));
            let shared = shared_max_age.expect("shared duration validated for intermediate");
            updated.set_header(
                locale,
                HEADER_S_MAXAGE,
                HeaderSetting::seconds(shared.resolve_seconds(now)),
            );
        }
        CacheTarget::All => {
            let max = max_age.expect("max-age validated for all");
            let shared = shared_max_age.expect("s-maxage validated for all");
            updated.set_header(
                locale,
                HEADER_MAX_AGE,
                HeaderSetting::seconds(max.resolve_seconds(now)),
            );
            updated.set_header(
                locale,
                HEADER_S_MAXAGE,
                HeaderSetting::seconds(shared.resolve_seconds(now)),
            );
        }
    }
    updated.set_header(
        locale,
        HEADER_EXPIRES,
        HeaderSetting::Value(EXPIRES_SENTINEL.to_string()),
    );

    let message = format!("Set cache properties for {}", node.name());
    let saved = repo.save(site.id(), updated, &message).await?;
    tracing::info!(node = %saved.id(), locale = %locale, target = %target, "cache policy updated");
    Ok(saved)
}
