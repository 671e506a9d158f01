//! # Modelgen Derive
//!
//! Marker attributes for hand-written model code.
//!
//! The generator reads these markers from existing sources to decide which
//! members to leave out or rename. At compile time they only check their
//! arguments and return the item unchanged.
//!
//! # Example
//! ```ignore
//! use modelgen::{implement_property, rename_model};
//!
//! #[rename_model("page", "WebPage")]
//! impl WebPage {
//!     #[implement_property("metaDescription")]
//!     pub fn meta_description(&self) -> Option<&str> {
//!         Some("written by hand")
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Ident, LitStr, Token};

/// Marks a member as implemented by hand: `#[implement_property("alias")]`.
#[proc_macro_attribute]
pub fn implement_property(args: TokenStream, item: TokenStream) -> TokenStream {
    pass_through(args, item, "implement_property", Args::Alias)
}

/// Excludes a member from generation: `#[ignore_property("alias")]`.
#[proc_macro_attribute]
pub fn ignore_property(args: TokenStream, item: TokenStream) -> TokenStream {
    pass_through(args, item, "ignore_property", Args::Alias)
}

/// Generates a member under another accessor name:
/// `#[rename_property("alias", "accessor_name")]`.
#[proc_macro_attribute]
pub fn rename_property(args: TokenStream, item: TokenStream) -> TokenStream {
    pass_through(args, item, "rename_property", Args::AliasAndName)
}

/// Declares that the enclosing model does not implement a member composed
/// from a mixin: `#[not_implemented("alias")]`.
#[proc_macro_attribute]
pub fn not_implemented(args: TokenStream, item: TokenStream) -> TokenStream {
    pass_through(args, item, "not_implemented", Args::Alias)
}

/// Excludes a whole content type: `#[ignore_model("typeAlias")]`.
#[proc_macro_attribute]
pub fn ignore_model(args: TokenStream, item: TokenStream) -> TokenStream {
    pass_through(args, item, "ignore_model", Args::Alias)
}

/// Generates a content type's model under another name:
/// `#[rename_model("typeAlias", "ModelName")]`.
#[proc_macro_attribute]
pub fn rename_model(args: TokenStream, item: TokenStream) -> TokenStream {
    pass_through(args, item, "rename_model", Args::AliasAndName)
}

/// Argument shape of a marker.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Args {
    /// `("alias")`
    Alias,
    /// `("alias", "Name")`, where the name must be an identifier.
    AliasAndName,
}

fn pass_through(tokens: TokenStream, item: TokenStream, marker: &str, args: Args) -> TokenStream {
    let item = proc_macro2::TokenStream::from(item);
    match check_args(tokens.into(), marker, args) {
        Ok(()) => item.into(),
        Err(err) => {
            let err = err.to_compile_error();
            quote! {
                #err
                #item
            }
            .into()
        }
    }
}

/// Checks a marker's string arguments.
fn check_args(tokens: proc_macro2::TokenStream, marker: &str, args: Args) -> syn::Result<()> {
    let lits = Punctuated::<LitStr, Token![,]>::parse_terminated.parse2(tokens)?;
    let expected = if args == Args::AliasAndName { 2 } else { 1 };
    if lits.len() != expected {
        return Err(syn::Error::new(
            Span::call_site(),
            format!(
                "`{}` expects {} string argument{}, found {}",
                marker,
                expected,
                if expected == 1 { "" } else { "s" },
                lits.len()
            ),
        ));
    }

    for lit in &lits {
        if lit.value().trim().is_empty() {
            return Err(syn::Error::new(lit.span(), "marker arguments must not be empty"));
        }
    }

    if args == Args::AliasAndName
        && let Some(name) = lits.iter().nth(1)
        && syn::parse_str::<Ident>(&name.value()).is_err()
    {
        return Err(syn::Error::new(
            name.span(),
            format!("`{}` is not a valid identifier", name.value()),
        ));
    }

    Ok(())
}
