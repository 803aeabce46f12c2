//! Injectable 派生宏实现

use crate::utils::{extract_arc_inner, has_generics};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    punctuated::Punctuated, Attribute, Data, DeriveInput, Fields, Ident, LitStr, Result, Token,
    Type,
};

/// 结构体上的 `#[injectable(...)]` 参数
#[derive(Default)]
pub struct InjectableArgs {
    /// 声明的作用域
    pub scope: Option<DeclaredScope>,
    /// 能够提供的抽象能力
    pub provides: Vec<Type>,
}

/// 声明的作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredScope {
    Singleton,
    Prototype,
}

impl InjectableArgs {
    /// 从结构体属性中解析
    pub fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("injectable")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("singleton") {
                    args.set_scope(DeclaredScope::Singleton, &meta)
                } else if meta.path.is_ident("prototype") {
                    args.set_scope(DeclaredScope::Prototype, &meta)
                } else if meta.path.is_ident("provides") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    args.provides.extend(types);
                    Ok(())
                } else {
                    Err(meta.error("不支持的 injectable 参数，可用: singleton, prototype, provides(...)"))
                }
            })?;
        }

        Ok(args)
    }

    fn set_scope(&mut self, scope: DeclaredScope, meta: &syn::meta::ParseNestedMeta<'_>) -> Result<()> {
        if self.scope.is_some() {
            return Err(meta.error("作用域只能声明一次"));
        }
        self.scope = Some(scope);
        Ok(())
    }
}

/// 字段上的 `#[inject(...)]` 参数
#[derive(Default)]
struct InjectArgs {
    /// 使用 `Default` 填充
    default: bool,
    /// 自定义参数名
    name: Option<String>,
}

impl InjectArgs {
    fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    args.default = true;
                    Ok(())
                } else if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    args.name = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("不支持的 inject 参数，可用: default, name = \"...\""))
                }
            })?;
        }

        Ok(args)
    }
}

/// 构造函数中每个字段的初始化方式
enum FieldInit {
    /// 注入的依赖
    Injected { field: Ident, parameter: String, requirement: Type },
    /// 默认值
    Default { field: Ident },
}

/// 实现 #[derive(Injectable)] 宏
pub fn derive_injectable_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    if has_generics(&input.generics) {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Injectable 不支持泛型结构体，请手动实现 Injectable",
        ));
    }

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "Injectable 只能用于结构体",
            ))
        }
    };

    let args = InjectableArgs::from_attributes(&input.attrs)?;
    let fields = collect_fields(&data.fields)?;

    let parameters = fields.iter().filter_map(|init| match init {
        FieldInit::Injected { parameter, requirement, .. } => Some(quote! {
            .parameter::<#requirement>(#parameter)
        }),
        FieldInit::Default { .. } => None,
    });

    let provides = args.provides.iter().map(|capability| {
        quote! {
            .provides::<#capability>(|it| it)
        }
    });

    let scope = args.scope.map(|scope| match scope {
        DeclaredScope::Singleton => quote! { .scope(::infrastructure_common::Scope::Singleton) },
        DeclaredScope::Prototype => quote! { .scope(::infrastructure_common::Scope::Prototype) },
    });

    let construct = match &data.fields {
        Fields::Unit => quote! { Self },
        _ => {
            let initializers = fields.iter().map(|init| match init {
                FieldInit::Injected { field, parameter, .. } => quote! {
                    #field: args.get(#parameter)?
                },
                FieldInit::Default { field } => quote! {
                    #field: ::core::default::Default::default()
                },
            });
            quote! { Self { #(#initializers),* } }
        }
    };

    // 没有注入字段时构造函数不读取参数
    let args_ident = if fields.iter().any(|init| matches!(init, FieldInit::Injected { .. })) {
        quote! { args }
    } else {
        quote! { _args }
    };

    Ok(quote! {
        impl ::infrastructure_common::Injectable for #struct_name {
            fn descriptor() -> ::infrastructure_common::TypeDescriptor {
                ::infrastructure_common::TypeDescriptor::builder::<Self>()
                    #(#parameters)*
                    #(#provides)*
                    #scope
                    .constructor(|#args_ident: &::infrastructure_common::Arguments| {
                        ::core::result::Result::Ok(#construct)
                    })
            }
        }
    })
}

fn collect_fields(fields: &Fields) -> Result<Vec<FieldInit>> {
    let named = match fields {
        Fields::Named(named) => named,
        Fields::Unit => return Ok(Vec::new()),
        Fields::Unnamed(unnamed) => {
            return Err(syn::Error::new_spanned(
                unnamed,
                "Injectable 需要具名字段，字段名即构造参数名",
            ))
        }
    };

    named
        .named
        .iter()
        .map(|field| {
            // 具名字段一定有标识符
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new_spanned(field, "缺少字段名"))?;
            let inject = InjectArgs::from_attributes(&field.attrs)?;

            if inject.default {
                return Ok(FieldInit::Default { field: ident });
            }

            let requirement = extract_arc_inner(&field.ty).ok_or_else(|| {
                syn::Error::new_spanned(
                    &field.ty,
                    "注入字段必须是 Arc<T>，其他字段请标记 #[inject(default)]",
                )
            })?;

            let parameter = inject
                .name
                .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());

            Ok(FieldInit::Injected {
                field: ident,
                parameter,
                requirement: requirement.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_injectable_args_defaults() {
        let args = InjectableArgs::default();

        assert_eq!(args.scope, None);
        assert!(args.provides.is_empty());
    }

    #[test]
    fn test_parse_scope_and_capabilities() {
        let input: DeriveInput = parse_quote! {
            #[injectable(prototype, provides(dyn OrderContext, dyn Audit))]
            struct MemoryOrderContext;
        };

        let args = InjectableArgs::from_attributes(&input.attrs).unwrap();

        assert_eq!(args.scope, Some(DeclaredScope::Prototype));
        assert_eq!(args.provides.len(), 2);
    }

    #[test]
    fn test_duplicate_scope_is_rejected() {
        let input: DeriveInput = parse_quote! {
            #[injectable(singleton, prototype)]
            struct MemoryOrderContext;
        };

        assert!(InjectableArgs::from_attributes(&input.attrs).is_err());
    }

    #[test]
    fn test_generated_descriptor_lists_parameters() {
        let input: DeriveInput = parse_quote! {
            struct OrderService {
                order_context: Arc<dyn OrderContext>,
                #[inject(name = "clock")]
                time: Arc<SystemClock>,
                #[inject(default)]
                processed: u64,
            }
        };

        let tokens = derive_injectable_impl(input).unwrap().to_string();

        assert!(tokens.contains("parameter :: < dyn OrderContext > (\"order_context\")"));
        assert!(tokens.contains("parameter :: < SystemClock > (\"clock\")"));
        assert!(tokens.contains("processed : :: core :: default :: Default :: default ()"));
    }

    #[test]
    fn test_non_arc_field_without_default_is_an_error() {
        let input: DeriveInput = parse_quote! {
            struct OrderService {
                processed: u64,
            }
        };

        assert!(derive_injectable_impl(input).is_err());
    }

    #[test]
    fn test_tuple_struct_is_an_error() {
        let input: DeriveInput = parse_quote! {
            struct OrderService(Arc<Order>);
        };

        assert!(derive_injectable_impl(input).is_err());
    }
}
