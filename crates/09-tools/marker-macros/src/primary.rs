//! 首选标记宏实现

use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, ItemStruct};

use crate::utils::registration_ident;

/// 实现 #[primary] 宏
pub fn primary_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        let args = proc_macro2::TokenStream::from(args);
        return syn::Error::new(args.span(), "primary 标记不接受参数")
            .to_compile_error()
            .into();
    }

    let input_struct = parse_macro_input!(input as ItemStruct);
    let struct_name = &input_struct.ident;
    let registration_fn_name = registration_ident("primary", struct_name, None);

    let expanded = quote! {
        #input_struct

        // 使用 ctor 在程序启动时登记类型级标记
        #[ctor::ctor]
        fn #registration_fn_name() {
            autowire_common::register_type_markers(
                std::any::TypeId::of::<#struct_name>(),
                autowire_common::TypeMarkers {
                    markers: Vec::new(),
                    primary: true,
                },
            );
        }
    };

    TokenStream::from(expanded)
}
