use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Type, parse_macro_input};

struct ModelField {
    ident: Ident,
    ty: Type,
    key: String,
    lens: Ident,
}

/// Generates one `FieldLens` per named field, a `<Model>Fields` accessor and
/// the `FormModel` impl listing every field key in declaration order.
#[proc_macro_derive(FormModel)]
pub fn derive_form_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            input.ident,
            "FormModel derive supports only non-generic structs",
        ));
    }

    let model = input.ident;
    let fields = model_fields(&model, input.data)?;
    let root = crate_path();
    let accessor = format_ident!("{model}Fields");

    let keys = fields.iter().map(|field| {
        let key = &field.key;
        quote!(#root::form::FieldKey::new(#key))
    });

    let accessor_methods = fields.iter().map(|field| {
        let ident = &field.ident;
        let lens = &field.lens;
        quote! {
            pub const fn #ident(&self) -> #lens {
                #lens
            }
        }
    });

    let lenses = fields.iter().map(|field| {
        let ModelField {
            ident,
            ty,
            key,
            lens,
        } = field;
        quote! {
            #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
            pub struct #lens;

            impl #root::form::FieldLens<#model> for #lens {
                type Value = #ty;

                fn key(self) -> #root::form::FieldKey {
                    #root::form::FieldKey::new(#key)
                }

                fn get<'a>(self, model: &'a #model) -> &'a Self::Value {
                    &model.#ident
                }

                fn set(self, model: &mut #model, value: Self::Value) {
                    model.#ident = value;
                }
            }
        }
    });

    Ok(quote! {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct #accessor;

        impl #accessor {
            #(#accessor_methods)*
        }

        impl #root::form::FormModel for #model {
            type Fields = #accessor;

            fn fields() -> Self::Fields {
                #accessor
            }

            fn field_keys() -> &'static [#root::form::FieldKey] {
                const KEYS: &[#root::form::FieldKey] = &[#(#keys),*];
                KEYS
            }
        }

        #(#lenses)*
    })
}

fn model_fields(model: &Ident, data: Data) -> syn::Result<Vec<ModelField>> {
    let Data::Struct(data) = data else {
        return Err(syn::Error::new(
            Span::call_site(),
            "FormModel derive is only supported on structs",
        ));
    };
    let Fields::Named(named) = data.fields else {
        return Err(syn::Error::new(
            Span::call_site(),
            "FormModel derive requires a struct with named fields",
        ));
    };

    Ok(named
        .named
        .into_iter()
        .filter_map(|field| {
            let ident = field.ident?;
            let key = ident.to_string();
            let lens = format_ident!("{model}{}Lens", pascal_case(&key));
            Some(ModelField {
                ident,
                ty: field.ty,
                key,
                lens,
            })
        })
        .collect())
}

fn crate_path() -> TokenStream2 {
    match crate_name("contact_form") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::contact_form),
    }
}

fn pascal_case(input: &str) -> String {
    input
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
