//! 限定符标记宏实现

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Expr, ItemStruct,
    Lit, LitStr, Meta, Result, Token,
};

use crate::utils::registration_ident;

/// 限定符标记参数
#[derive(Debug, Clone, Default)]
pub struct QualifiedArgs {
    /// 限定值
    pub value: Option<String>,
    /// 限定符类别，缺省使用标准类别
    pub kind: Option<String>,
}

impl Parse for QualifiedArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = QualifiedArgs::default();

        // 简写形式：#[qualified("value")]
        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            args.value = Some(lit.value());
            if input.peek(Token![,]) {
                let _: Token![,] = input.parse()?;
            }
        }

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;
        for meta in parsed {
            if let Meta::NameValue(nv) = meta {
                if nv.path.is_ident("value") {
                    if let Expr::Lit(expr_lit) = nv.value {
                        if let Lit::Str(lit_str) = expr_lit.lit {
                            args.value = Some(lit_str.value());
                        }
                    }
                } else if nv.path.is_ident("kind") {
                    if let Expr::Lit(expr_lit) = nv.value {
                        if let Lit::Str(lit_str) = expr_lit.lit {
                            args.kind = Some(lit_str.value());
                        }
                    }
                }
            }
        }

        Ok(args)
    }
}

/// 实现 #[qualified] 宏
pub fn qualified_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let qualified_args = if args.is_empty() {
        QualifiedArgs::default()
    } else {
        match syn::parse::<QualifiedArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = parse_macro_input!(input as ItemStruct);
    let struct_name = &input_struct.ident;

    let kind_expr = match &qualified_args.kind {
        Some(kind) => quote! { #kind.to_string() },
        None => quote! { autowire_common::QUALIFIER_KIND.to_string() },
    };
    let value_expr = match &qualified_args.value {
        Some(value) => quote! { Some(#value.to_string()) },
        None => quote! { None },
    };

    // 同一类型允许多个不同的限定符标记，注册函数名带入参数片段防止冲突
    let fragment = qualified_args
        .value
        .as_deref()
        .or(qualified_args.kind.as_deref());
    let registration_fn_name = registration_ident("qualifier", struct_name, fragment);

    let expanded = quote! {
        #input_struct

        // 使用 ctor 在程序启动时登记类型级标记
        #[ctor::ctor]
        fn #registration_fn_name() {
            autowire_common::register_type_markers(
                std::any::TypeId::of::<#struct_name>(),
                autowire_common::TypeMarkers {
                    markers: vec![autowire_common::MetadataMarker::Qualifier(
                        autowire_common::QualifierSpec {
                            kind: #kind_expr,
                            value: #value_expr,
                        },
                    )],
                    primary: false,
                },
            );
        }
    };

    TokenStream::from(expanded)
}
