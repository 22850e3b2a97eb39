//! Code generation for `#[derive(Record)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, parse_quote};

use crate::attr::FieldAttr;

/// Expand the derive into `Record` and `Bindable` impls for `input`.
pub(crate) fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let fields = named_fields(input)?;

    let mut visits = Vec::with_capacity(fields.len());
    for field in fields {
        let attr = FieldAttr::from_field(field)?;
        if attr.skip {
            continue;
        }
        let Some(member) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Record requires named fields"));
        };
        let name = member.unraw().to_string();
        let annotation = match (&attr.key, &attr.default) {
            (Some(key), Some(default)) => quote! {
                ::core::option::Option::Some(::envconf::Annotation::new(
                    #key,
                    ::core::option::Option::Some(#default),
                ))
            },
            (Some(key), None) => quote! {
                ::core::option::Option::Some(::envconf::Annotation::new(
                    #key,
                    ::core::option::Option::None,
                ))
            },
            (None, _) => quote!(::core::option::Option::None),
        };
        visits.push(quote! {
            visitor.visit(::envconf::Field::new(
                #name,
                #annotation,
                ::envconf::Bindable::slot(&mut self.#member),
            ))?;
        });
    }

    let visitor = if visits.is_empty() {
        format_ident!("_visitor")
    } else {
        format_ident!("visitor")
    };

    let mut generics = input.generics.clone();
    for param in input.generics.type_params() {
        let param = &param.ident;
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#param: ::envconf::Bindable));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::envconf::Record for #ident #ty_generics #where_clause {
            fn visit_fields(
                &mut self,
                #visitor: &mut dyn ::envconf::FieldVisitor,
            ) -> ::core::result::Result<(), ::envconf::LoadError> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }

        #[automatically_derived]
        impl #impl_generics ::envconf::Bindable for #ident #ty_generics #where_clause {
            fn slot(&mut self) -> ::envconf::Slot<'_> {
                ::envconf::Slot::Struct(self)
            }
        }
    })
}

fn named_fields(input: &DeriveInput) -> syn::Result<Vec<&syn::Field>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Ok(named.named.iter().collect()),
            Fields::Unit => Ok(Vec::new()),
            Fields::Unnamed(_) => Err(syn::Error::new_spanned(
                &input.ident,
                "Record requires a struct with named fields",
            )),
        },
        Data::Enum(_) | Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::derive;
    use syn::{DeriveInput, parse_quote};

    fn expand(input: &DeriveInput) -> String {
        derive(input)
            .unwrap_or_else(|e| panic!("expansion failed: {e}"))
            .to_string()
    }

    #[test]
    fn visits_fields_in_declaration_order() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[env(key = "PORT", default = "8080")]
                port: i64,
                name: String,
                nested: Nested,
            }
        };
        let out = expand(&input);
        let port = out.find("\"port\"").expect("port visited");
        let name = out.find("\"name\"").expect("name visited");
        let nested = out.find("\"nested\"").expect("nested visited");
        assert!(port < name && name < nested);
        assert!(out.contains("\"PORT\""));
        assert!(out.contains("\"8080\""));
        assert!(out.contains("impl :: envconf :: Bindable for Config"));
    }

    #[test]
    fn skipped_fields_are_not_visited() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[env(skip)]
                handle: Handle,
            }
        };
        let out = expand(&input);
        assert!(!out.contains("\"handle\""));
        assert!(out.contains("_visitor"));
    }

    #[test]
    fn raw_identifiers_are_named_without_prefix() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[env(key = "TYPE")]
                r#type: String,
            }
        };
        let out = expand(&input);
        assert!(out.contains("\"type\""));
        assert!(out.contains("self . r#type"));
    }

    #[test]
    fn type_parameters_are_bound() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper<T> {
                inner: T,
            }
        };
        let out = expand(&input);
        assert!(out.contains("T : :: envconf :: Bindable"));
    }

    #[test]
    fn unit_structs_expand() {
        let input: DeriveInput = parse_quote! {
            struct Empty;
        };
        assert!(derive(&input).is_ok());
    }

    #[test]
    fn rejects_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            struct Config(i64);
        };
        let err = derive(&input).expect_err("tuple struct");
        assert_eq!(err.to_string(), "Record requires a struct with named fields");
    }

    #[test]
    fn rejects_enums() {
        let input: DeriveInput = parse_quote! {
            enum Mode { Fast, Slow }
        };
        let err = derive(&input).expect_err("enum");
        assert_eq!(err.to_string(), "Record can only be derived for structs");
    }

    #[test]
    fn attribute_errors_surface() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[env(default = "1")]
                port: i64,
            }
        };
        let err = derive(&input).expect_err("default without key");
        assert_eq!(err.to_string(), "`default` requires a `key`");
    }
}
