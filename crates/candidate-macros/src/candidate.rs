//! 候选类型登记宏实现

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Expr, Ident,
    ItemStruct, Lit, Meta, Result, Token,
};

/// 候选类型配置参数
#[derive(Debug, Clone, Default)]
pub struct CandidateArgs {
    /// 所属模块名称（默认为 crate 名称）
    pub module: Option<String>,
    /// 声明的能力列表
    pub contracts: Vec<String>,
    /// 是否为抽象类型
    pub abstract_type: bool,
    /// 自定义限定名称
    pub name: Option<String>,
}

impl Parse for CandidateArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut args = CandidateArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::Path(path) => {
                    if path.is_ident("abstract_type") {
                        args.abstract_type = true;
                    }
                }
                Meta::NameValue(nv) => {
                    if nv.path.is_ident("module") {
                        if let Expr::Lit(expr_lit) = nv.value {
                            if let Lit::Str(lit_str) = expr_lit.lit {
                                args.module = Some(lit_str.value());
                            }
                        }
                    } else if nv.path.is_ident("name") {
                        if let Expr::Lit(expr_lit) = nv.value {
                            if let Lit::Str(lit_str) = expr_lit.lit {
                                args.name = Some(lit_str.value());
                            }
                        }
                    }
                }
                Meta::List(list) => {
                    if list.path.is_ident("contracts") {
                        let contracts = list.parse_args_with(
                            Punctuated::<ContractRef, Token![,]>::parse_terminated,
                        )?;
                        args.contracts
                            .extend(contracts.into_iter().map(|contract| contract.0));
                    }
                }
            }
        }

        Ok(args)
    }
}

/// 能力引用：标识符或字符串字面量
struct ContractRef(String);

impl Parse for ContractRef {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if input.peek(syn::LitStr) {
            let lit: syn::LitStr = input.parse()?;
            Ok(Self(lit.value()))
        } else {
            let ident: Ident = input.parse()?;
            Ok(Self(ident.to_string()))
        }
    }
}

/// 实现 #[candidate] 宏
pub fn candidate_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let candidate_args = if args.is_empty() {
        CandidateArgs::default()
    } else {
        match syn::parse::<CandidateArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = parse_macro_input!(input as ItemStruct);
    let struct_name = &input_struct.ident;

    let registration_code = generate_registration_code(struct_name, &candidate_args);

    let expanded = quote! {
        #input_struct

        #registration_code
    };

    TokenStream::from(expanded)
}

/// 生成候选类型自动登记代码
fn generate_registration_code(
    struct_name: &Ident,
    args: &CandidateArgs,
) -> proc_macro2::TokenStream {
    let registration_fn_name = Ident::new(
        &format!(
            "__register_candidate_{}",
            struct_name.to_string().to_lowercase()
        ),
        Span::call_site(),
    );

    let module_expr = match &args.module {
        Some(module) => quote! { #module },
        None => quote! { ::core::env!("CARGO_PKG_NAME") },
    };

    let name_expr = match &args.name {
        Some(name) => quote! { ::std::string::String::from(#name) },
        None => {
            let ident = struct_name.to_string();
            quote! {
                ::std::format!("{}::{}", ::core::module_path!(), #ident)
            }
        }
    };

    let contracts = &args.contracts;
    let abstract_marker = if args.abstract_type {
        quote! { candidate = candidate.abstract_type(); }
    } else {
        quote! {}
    };

    quote! {
        // 使用 ctor 在程序启动时自动登记候选类型
        #[ctor::ctor]
        fn #registration_fn_name() {
            let mut candidate =
                ::conventions_common::CandidateType::new(#name_expr, #module_expr);
            #(
                candidate = candidate.with_capability(#contracts);
            )*
            #abstract_marker

            ::conventions_common::register_candidate(candidate);
        }
    }
}
