//! Macro expansion logic for sieve.

use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, parse2};

use crate::attrs::{RULE_ATTR, RuleAttr, RuleKeySpec};

/// A method registered as a rule.
pub(crate) struct RuleMethod {
    /// Key the rule is registered under.
    pub(crate) key: RuleKeySpec,
    /// Method name.
    pub(crate) ident: Ident,
    /// Number of arguments besides `&self`: none, the body, or the body and the context.
    pub(crate) arity: usize,
}

/// Expand the `#[error_rules]` attribute on an impl block.
pub fn expand_error_rules(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(
            attr,
            "`#[error_rules]` does not take arguments",
        ));
    }

    let mut item_impl: ItemImpl = parse2(item)?;
    if let Some((_, path, _)) = &item_impl.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "`#[error_rules]` must be placed on an inherent impl block",
        ));
    }

    let methods = extract_rule_methods(&mut item_impl)?;
    if methods.is_empty() {
        return Err(syn::Error::new_spanned(
            &item_impl.self_ty,
            "no rule found: name methods `errors_for_<key>` or annotate them with `#[rule(\"<key>\")]`",
        ));
    }

    let rule_set_impl = generate_rule_set_impl(&item_impl, &methods);

    Ok(quote! {
        #item_impl
        #rule_set_impl
    })
}

/// Collect rule methods, stripping their `#[rule]` attributes.
fn extract_rule_methods(item_impl: &mut ItemImpl) -> syn::Result<Vec<RuleMethod>> {
    let mut methods = Vec::new();
    let mut seen: HashMap<RuleKeySpec, Ident> = HashMap::new();

    for item in &mut item_impl.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let Some(key) = take_rule_key(method)? else {
            continue;
        };

        let ident = method.sig.ident.clone();
        if let Some(previous) = seen.get(&key) {
            return Err(syn::Error::new(
                ident.span(),
                format!("duplicate rule for `{key}`, already declared by `{previous}`"),
            ));
        }

        let arity = rule_arity(method)?;
        seen.insert(key, ident.clone());
        methods.push(RuleMethod { key, ident, arity });
    }

    Ok(methods)
}

/// Key of a rule method: from `#[rule(...)]`, else from an `errors_for_<key>` name.
fn take_rule_key(method: &mut ImplItemFn) -> syn::Result<Option<RuleKeySpec>> {
    let mut explicit = None;
    let mut kept = Vec::with_capacity(method.attrs.len());

    for attr in method.attrs.drain(..) {
        if !attr.path().is_ident(RULE_ATTR) {
            kept.push(attr);
            continue;
        }
        if explicit.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "a method can only be registered under one rule key",
            ));
        }
        let RuleAttr { key } = attr.parse_args()?;
        explicit = Some(key);
    }
    method.attrs = kept;

    Ok(explicit.or_else(|| RuleKeySpec::from_method_name(&method.sig.ident.to_string())))
}

/// Check the signature of a rule method and count its arguments besides `&self`.
fn rule_arity(method: &ImplItemFn) -> syn::Result<usize> {
    let sig = &method.sig;

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "rule methods cannot be async",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "rule methods cannot be generic",
        ));
    }

    match sig.inputs.first() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new(
                sig.span(),
                "rule methods must take `&self`",
            ));
        }
    }

    let arity = sig.inputs.len() - 1;
    if arity > 2 {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            "rule methods take at most the body (`&Value`) and the context (`&RuleContext`)",
        ));
    }

    Ok(arity)
}

/// Generate the `RuleSet` implementation registering every rule method.
fn generate_rule_set_impl(item_impl: &ItemImpl, methods: &[RuleMethod]) -> TokenStream {
    let self_ty = &item_impl.self_ty;
    let (impl_generics, _, where_clause) = item_impl.generics.split_for_impl();

    let registrations = methods.iter().map(generate_registration);

    quote! {
        impl #impl_generics ::sieve::RuleSet for #self_ty #where_clause {
            fn register(
                self: ::std::sync::Arc<Self>,
                registry: &mut ::sieve::RuleRegistry,
            ) {
                #(#registrations)*
            }
        }
    }
}

/// Generate the registration of a single rule method.
fn generate_registration(method: &RuleMethod) -> TokenStream {
    let key = method.key.to_tokens();
    let ident = &method.ident;

    let closure = match method.arity {
        0 => quote! {
            move |_: &::sieve::serde_json::Value, _: &::sieve::RuleContext<'_>| -> ::sieve::ErrorMap {
                rules.#ident()
            }
        },
        1 => quote! {
            move |body: &::sieve::serde_json::Value, _: &::sieve::RuleContext<'_>| -> ::sieve::ErrorMap {
                rules.#ident(body)
            }
        },
        _ => quote! {
            move |body: &::sieve::serde_json::Value, ctx: &::sieve::RuleContext<'_>| -> ::sieve::ErrorMap {
                rules.#ident(body, ctx)
            }
        },
    };

    quote! {
        {
            let rules = ::std::sync::Arc::clone(&self);
            registry.insert(#key, #closure);
        }
    }
}
