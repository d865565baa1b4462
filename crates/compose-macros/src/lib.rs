use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ItemFn;

/// Marks a function as composable.
///
/// The body runs inside its own composition group keyed by the location of
/// the function definition, so `remember`/`useState` calls made by two
/// different composables never share slots.
#[proc_macro_attribute]
pub fn composable(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand(attr.into(), item.into()).into()
}

fn expand(attr: TokenStream2, item: TokenStream2) -> TokenStream2 {
    if !attr.is_empty() {
        return syn::Error::new_spanned(attr, "unsupported composable attribute")
            .to_compile_error();
    }

    let mut func: ItemFn = match syn::parse2(item) {
        Ok(func) => func,
        Err(err) => return err.to_compile_error(),
    };
    if let Some(constness) = &func.sig.constness {
        return syn::Error::new_spanned(constness, "composable functions cannot be const")
            .to_compile_error();
    }
    if let Some(asyncness) = &func.sig.asyncness {
        return syn::Error::new_spanned(asyncness, "composable functions cannot be async")
            .to_compile_error();
    }

    let original_block = &func.block;
    let key_expr = quote! { compose_core::location_key(file!(), line!(), column!()) };
    let wrapped = quote!({
        compose_core::with_current_composer(|__composer| {
            __composer.with_group(#key_expr, |_| #original_block)
        })
    });
    func.block = match syn::parse2(wrapped) {
        Ok(block) => Box::new(block),
        Err(err) => return err.to_compile_error(),
    };
    quote! { #func }
}

#[cfg(test)]
mod tests {
    use super::expand;
    use quote::quote;

    #[test]
    fn wraps_body_in_location_keyed_group() {
        let output = expand(
            quote! {},
            quote! {
                fn Greeting(name: &str) {
                    Text(name);
                }
            },
        )
        .to_string();
        assert!(output.contains("with_current_composer"));
        assert!(output.contains("with_group"));
        assert!(output.contains("location_key"));
        assert!(output.contains("fn Greeting"));
    }

    #[test]
    fn rejects_attribute_arguments() {
        let output = expand(quote! { no_skip }, quote! { fn Screen() {} }).to_string();
        assert!(output.contains("compile_error"));
        assert!(output.contains("unsupported composable attribute"));
    }

    #[test]
    fn rejects_async_functions() {
        let output = expand(quote! {}, quote! { async fn Screen() {} }).to_string();
        assert!(output.contains("cannot be async"));
    }
}
