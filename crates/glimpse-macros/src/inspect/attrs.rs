//! Parsing of `#[inspect(...)]` attributes.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, Meta, Result, Token,
};

/// Field-level attributes.
#[derive(Debug, Clone, Default)]
pub struct FieldAttr {
    pub skip: bool,
    pub rename: Option<String>,
}

/// Struct-level attributes.
#[derive(Debug, Clone, Default)]
pub struct ContainerAttr {
    /// Type label shown in the summary.
    pub name: Option<String>,
}

fn string_value(expr: &Expr, key: &str) -> Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value()),
        other => Err(Error::new(
            other.span(),
            format!("{key} must be a string literal"),
        )),
    }
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();
        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    attr.rename = Some(string_value(&nv.value, "rename")?);
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown inspect field attribute. Expected: skip or rename = \"...\"",
                    ))
                }
            }
        }

        Ok(attr)
    }
}

impl Parse for ContainerAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ContainerAttr::default();
        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    attr.name = Some(string_value(&nv.value, "name")?);
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown inspect attribute. Expected: name = \"...\"",
                    ))
                }
            }
        }

        Ok(attr)
    }
}

/// Merges every `#[inspect(...)]` on a field.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    let mut merged = FieldAttr::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("inspect")) {
        let parsed = attr.parse_args::<FieldAttr>()?;
        merged.skip |= parsed.skip;
        if parsed.rename.is_some() {
            merged.rename = parsed.rename;
        }
    }
    Ok(merged)
}

pub fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttr> {
    let mut merged = ContainerAttr::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("inspect")) {
        let parsed = attr.parse_args::<ContainerAttr>()?;
        if parsed.name.is_some() {
            merged.name = parsed.name;
        }
    }
    Ok(merged)
}
