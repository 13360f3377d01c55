use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Wraps a function in a `tracing` span and logs every call and return value
/// at trace level.
///
/// Arguments are forwarded to `#[tracing::instrument]`, so `skip(...)`,
/// `fields(...)` and friends work as usual.
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    let name = sig.ident.to_string();

    quote! {
        #[::tracing::instrument(ret(level = "trace"), #meta)]
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!(function = #name, "call");
            #block
        }
    }
    .into()
}
