//! Procedural macros for plotcast

use std::collections::BTreeMap;

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Enable automatic category inference from variant name prefixes
    #[darling(default)]
    infer_categories: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Exclude from category inference
    #[darling(default)]
    skip_category: bool,
}

impl ActionVariant {
    fn resolved_category(&self) -> Option<String> {
        if self.skip_category {
            return None;
        }
        self.category
            .clone()
            .or_else(|| infer_category(&self.ident.to_string()))
    }
}

// Words that end the subject part of a variant name. A name like
// `ForecastFetch` is read as subject "Forecast" + verb "Fetch".
const ACTION_VERBS: &[&str] = &[
    "Fetch", "Load", "Did", "Set", "Clear", "Reset", "Update", "Submit", "Cancel", "Next", "Prev",
    "Up", "Down", "Left", "Right", "Focus", "Blur", "Select", "Toggle", "Show", "Hide", "Open",
    "Close", "Scroll", "Enter", "Exit",
];

fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for ch in s.chars() {
        match parts.last_mut() {
            Some(current) if !ch.is_uppercase() => current.push(ch),
            _ => parts.push(ch.to_string()),
        }
    }
    parts
}

fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(ch.to_lowercase());
    }
    out
}

fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect()
}

/// Infer a category from the words before the first verb.
///
/// `ForecastFetch` -> `forecast`, `UiSelectNext` -> `ui`. Names that start
/// with a verb (`SetData`, `LoadFailed`) or contain none are uncategorized.
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    let first = parts.first()?;
    if ACTION_VERBS.contains(&first.as_str()) {
        return None;
    }

    let verb_at = parts
        .iter()
        .skip(1)
        .position(|part| ACTION_VERBS.contains(&part.as_str()))?
        + 1;

    Some(to_snake_case(&parts[..verb_at].concat()))
}

fn name_impl(name: &Ident, variants: &[&ActionVariant]) -> TokenStream2 {
    let arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let label = ident.to_string();
        let pattern = match v.fields.style {
            darling::ast::Style::Unit => quote! { #name::#ident },
            darling::ast::Style::Tuple => quote! { #name::#ident(..) },
            darling::ast::Style::Struct => quote! { #name::#ident { .. } },
        };
        quote! { #pattern => #label }
    });

    quote! {
        impl ::plotcast::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#arms,)*
                }
            }
        }
    }
}

fn category_impl(name: &Ident, variants: &[&ActionVariant]) -> TokenStream2 {
    let resolved: Vec<(&Ident, Option<String>)> = variants
        .iter()
        .map(|v| (&v.ident, v.resolved_category()))
        .collect();

    let mut members: BTreeMap<String, Vec<&Ident>> = BTreeMap::new();
    for (ident, category) in &resolved {
        if let Some(category) = category {
            members.entry(category.clone()).or_default().push(ident);
        }
    }

    let enum_name = format_ident!("{}Category", name);
    let labels: Vec<&String> = members.keys().collect();
    let enum_variants: Vec<Ident> = labels
        .iter()
        .map(|c| format_ident!("{}", to_pascal_case(c)))
        .collect();

    let str_arms = resolved.iter().map(|(ident, category)| match category {
        Some(c) => quote! { #name::#ident { .. } => ::core::option::Option::Some(#c) },
        None => quote! { #name::#ident { .. } => ::core::option::Option::None },
    });
    let enum_arms = resolved.iter().map(|(ident, category)| {
        let target = match category {
            Some(c) => format_ident!("{}", to_pascal_case(c)),
            None => format_ident!("Uncategorized"),
        };
        quote! { #name::#ident { .. } => #enum_name::#target }
    });

    let predicates = members.iter().map(|(category, idents)| {
        let predicate = format_ident!("is_{}", category);
        let doc = format!("Returns true if this action belongs to the `{}` category.", category);
        quote! {
            #[doc = #doc]
            pub fn #predicate(&self) -> bool {
                matches!(self, #(#name::#idents { .. })|*)
            }
        }
    });

    let enum_doc = format!(
        "Action categories for [`{}`].\n\nUse [`{}::category_enum()`] to get the category of an action.",
        name, name
    );

    quote! {
        #[doc = #enum_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum #enum_name {
            #(#enum_variants,)*
            /// Actions that don't belong to any specific category.
            Uncategorized,
        }

        impl #enum_name {
            /// Get all category values
            pub fn all() -> &'static [Self] {
                &[#(Self::#enum_variants,)* Self::Uncategorized]
            }

            /// Get category name as string
            pub fn name(&self) -> &'static str {
                match self {
                    #(Self::#enum_variants => #labels,)*
                    Self::Uncategorized => "uncategorized",
                }
            }
        }

        impl #name {
            /// Get the action's category (if categorized)
            pub fn category(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#str_arms,)*
                }
            }

            /// Get the category as an enum value
            pub fn category_enum(&self) -> #enum_name {
                match self {
                    #(#enum_arms,)*
                }
            }

            #(#predicates)*
        }

        impl ::plotcast::ActionCategory for #name {
            type Category = #enum_name;

            fn category(&self) -> ::core::option::Option<&'static str> {
                #name::category(self)
            }

            fn category_enum(&self) -> Self::Category {
                #name::category_enum(self)
            }
        }
    }
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name as a static string.
///
/// With `#[action(infer_categories)]`, also generates:
/// - `category() -> Option<&'static str>` - Get action's category
/// - `category_enum() -> {Name}Category` - Get category as enum
/// - `is_{category}()` predicates for each category
/// - `{Name}Category` enum with all discovered categories
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum Action {
///     SetLocation(String),
///     ForecastFetch,
///     UiSelectNext,
///     #[action(category = "ui")]
///     Quit,
/// }
///
/// assert_eq!(Action::ForecastFetch.name(), "ForecastFetch");
/// assert_eq!(Action::ForecastFetch.category(), Some("forecast"));
/// assert!(Action::UiSelectNext.is_ui());
/// assert_eq!(Action::SetLocation("x".into()).category(), None);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let variants: Vec<&ActionVariant> = match &opts.data {
        darling::ast::Data::Enum(variants) => variants.iter().collect(),
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let mut expanded = name_impl(&opts.ident, &variants);
    if opts.infer_categories {
        expanded.extend(category_impl(&opts.ident, &variants));
    }

    TokenStream::from(expanded)
}
