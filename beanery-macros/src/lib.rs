//! Derive macros for Beanery.
//!
//! `#[derive(Injectable)]` describes a struct's constructor from its fields
//! and submits the type to the global catalog.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use beanery::{Injectable, stereotype::SERVICE};
//!
//! #[derive(Injectable)]
//! #[injectable(tags(SERVICE))]
//! pub struct UserService {
//!     repo: Arc<UserRepository>,
//!     clock: Arc<Clock>,
//! }
//! ```
//!
//! Every field must be an `Arc<T>` where `T: Injectable`; field order is
//! constructor parameter order. A struct without tags is still constructible
//! as a dependency, it just never enters the build worklist on its own.

use darling::util::PathList;
use darling::{FromDeriveInput, FromField, ast};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{DeriveInput, GenericArgument, PathArguments, Type, parse_macro_input};

#[derive(Debug, FromField)]
struct InjectableField {
    ident: Option<syn::Ident>,
    ty: Type,
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(injectable), supports(struct_named, struct_unit))]
struct InjectableInput {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<(), InjectableField>,
    /// Capability tag constants attached to the type.
    #[darling(default)]
    tags: PathList,
}

#[proc_macro_derive(Injectable, attributes(injectable))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let parsed = match InjectableInput::from_derive_input(&input) {
        Ok(parsed) => parsed,
        Err(err) => return err.write_errors().into(),
    };

    expand(parsed)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: InjectableInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "#[derive(Injectable)] does not support generic types",
        ));
    }

    let fields = match input.data {
        ast::Data::Struct(fields) => fields.fields,
        ast::Data::Enum(_) => {
            return Err(syn::Error::new(
                ident.span(),
                "#[derive(Injectable)] only supports structs",
            ));
        }
    };

    let mut params = Vec::with_capacity(fields.len());
    let mut inits = Vec::with_capacity(fields.len());

    for field in &fields {
        let dependency = arc_inner(&field.ty).ok_or_else(|| {
            syn::Error::new(
                field.ty.span(),
                "injected fields must be `Arc<T>` where `T: Injectable`",
            )
        })?;
        let name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new(field.ty.span(), "expected a named field"))?;

        params.push(quote_spanned! { field.ty.span() =>
            <#dependency as ::beanery::Injectable>::descriptor as ::beanery::DescriptorFn
        });
        inits.push(quote! {
            #name: args.take::<#dependency>()?
        });
    }

    let tags = input.tags.iter();

    let factory = if inits.is_empty() {
        quote! {
            |_: ::beanery::Arguments| ::std::result::Result::Ok(#ident {})
        }
    } else {
        quote! {
            |mut args: ::beanery::Arguments| ::std::result::Result::Ok(#ident {
                #(#inits),*
            })
        }
    };

    Ok(quote! {
        impl ::beanery::Injectable for #ident {
            fn descriptor() -> ::beanery::TypeDescriptor {
                const TAGS: &[::beanery::CapabilityTag] = &[#(#tags),*];

                ::beanery::TypeDescriptor::of::<Self>()
                    .with_tags(TAGS)
                    .with_constructor(::beanery::Constructor::new(
                        &[#(#params),*],
                        #factory,
                    ))
            }
        }

        ::beanery::__private::inventory::submit! {
            ::beanery::ComponentRegistration::new(
                <#ident as ::beanery::Injectable>::descriptor
            )
        }
    })
}

/// Returns `T` for a field of type `Arc<T>` (any path ending in `Arc`).
fn arc_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }

    let PathArguments::AngleBracketed(generic) = &segment.arguments else {
        return None;
    };
    if generic.args.len() != 1 {
        return None;
    }

    match generic.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
