//! Parsing of `#[env(...)]` field attributes.

use syn::{Attribute, LitStr};

/// Binding options declared on one field.
#[derive(Debug, Default)]
pub(crate) struct FieldAttr {
    pub(crate) key: Option<LitStr>,
    pub(crate) default: Option<LitStr>,
    pub(crate) skip: bool,
}

impl FieldAttr {
    /// Collect and validate the `env` attribute of `field`, if any.
    pub(crate) fn from_field(field: &syn::Field) -> syn::Result<Self> {
        let mut out = Self::default();
        let mut seen: Option<&Attribute> = None;

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("env")) {
            if seen.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate `env` attribute"));
            }
            seen = Some(attr);
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    if out.key.is_some() {
                        return Err(meta.error("duplicate `key`"));
                    }
                    out.key = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("default") {
                    if out.default.is_some() {
                        return Err(meta.error("duplicate `default`"));
                    }
                    out.default = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported env option, expected `key`, `default` or `skip`"))
                }
            })?;
        }

        out.validate(seen)?;
        Ok(out)
    }

    fn validate(&self, attr: Option<&Attribute>) -> syn::Result<()> {
        if let Some(key) = &self.key {
            if key.value().is_empty() {
                return Err(syn::Error::new(key.span(), "env key must not be empty"));
            }
        }
        if self.key.is_none() {
            if let Some(default) = &self.default {
                return Err(syn::Error::new(default.span(), "`default` requires a `key`"));
            }
        }
        if self.skip && (self.key.is_some() || self.default.is_some()) {
            if let Some(attr) = attr {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`skip` cannot be combined with `key` or `default`",
                ));
            }
        }
        Ok(())
    }
}
