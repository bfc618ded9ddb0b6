//! 候选选择
//!
//! 在解析器链收窄之后完成最终选型：默认值短路、候选收集、自引用
//! 过滤与歧义仲裁。

use std::sync::Arc;

use tracing::debug;

use autowire_abstractions::{AutowireCandidateResolver, DefinitionRegistry};
use autowire_common::{
    CandidateHolder, DependencyDescriptor, SelectionError, SelectionResult,
};

/// 选型结论
#[derive(Debug, Clone)]
pub enum SelectionOutcome {
    /// 已选出唯一候选
    Selected(CandidateHolder),
    /// 描述符声明了默认值表达式，跳过候选搜索，由容器求值
    DefaultValue(String),
    /// 非必需注入点无法确定候选，跳过注入
    Skipped,
}

/// 候选选择器
///
/// 把注册表的类型预筛、解析器链的逐候选判定与歧义仲裁串成一次完整
/// 选型。自身无状态，构建后可跨线程共享。
pub struct CandidateSelector {
    registry: Arc<dyn DefinitionRegistry>,
    resolver: Arc<dyn AutowireCandidateResolver>,
}

impl CandidateSelector {
    /// 创建候选选择器
    pub fn new(
        registry: Arc<dyn DefinitionRegistry>,
        resolver: Arc<dyn AutowireCandidateResolver>,
    ) -> Self {
        Self { registry, resolver }
    }

    /// 候选定义注册表
    pub fn registry(&self) -> &Arc<dyn DefinitionRegistry> {
        &self.registry
    }

    /// 解析器链
    pub fn resolver(&self) -> &Arc<dyn AutowireCandidateResolver> {
        &self.resolver
    }

    /// 收集注入点的幸存候选
    ///
    /// 首轮排除自引用候选；仅当首轮无幸存者时，自引用候选作为兜底
    /// 重新参与判定。结果顺序继承注册表的键序。
    pub fn narrow(&self, descriptor: &DependencyDescriptor) -> Vec<CandidateHolder> {
        let candidates = self.registry.candidates_of_type(descriptor.declared_type());
        let owner = descriptor.containing_component();

        let survivors: Vec<CandidateHolder> = candidates
            .iter()
            .filter(|holder| !Self::is_self_reference(holder, owner))
            .filter(|holder| self.resolver.is_autowire_candidate(holder, descriptor))
            .cloned()
            .collect();
        if !survivors.is_empty() {
            debug!(
                descriptor = %descriptor,
                survivors = survivors.len(),
                "候选收窄完成"
            );
            return survivors;
        }

        // 自引用兜底
        let fallback: Vec<CandidateHolder> = candidates
            .iter()
            .filter(|holder| Self::is_self_reference(holder, owner))
            .filter(|holder| self.resolver.is_autowire_candidate(holder, descriptor))
            .cloned()
            .collect();
        if !fallback.is_empty() {
            debug!(
                descriptor = %descriptor,
                survivors = fallback.len(),
                "首轮无幸存候选，自引用候选兜底"
            );
        }
        fallback
    }

    /// 为注入点选型
    ///
    /// 默认值表达式短路于候选搜索之前；无幸存候选时按实际必需性决定
    /// 报错或跳过；多个幸存候选依次以首选标志、优先级、依赖名称仲裁。
    pub fn select(&self, descriptor: &DependencyDescriptor) -> SelectionResult<SelectionOutcome> {
        if let Some(expression) = self.resolver.suggested_value(descriptor) {
            debug!(
                descriptor = %descriptor,
                expression = %expression,
                "注入点声明默认值表达式，跳过候选搜索"
            );
            return Ok(SelectionOutcome::DefaultValue(expression));
        }

        let survivors = self.narrow(descriptor);
        match survivors.len() {
            0 => {
                if self.resolver.is_required(descriptor) {
                    Err(SelectionError::UnsatisfiedDependency {
                        descriptor: descriptor.to_string(),
                    })
                } else {
                    debug!(descriptor = %descriptor, "非必需注入点无候选，跳过注入");
                    Ok(SelectionOutcome::Skipped)
                }
            }
            1 => {
                let holder = survivors.into_iter().next().ok_or_else(|| {
                    SelectionError::UnsatisfiedDependency {
                        descriptor: descriptor.to_string(),
                    }
                })?;
                debug!(descriptor = %descriptor, candidate = holder.key(), "唯一候选胜出");
                Ok(SelectionOutcome::Selected(holder))
            }
            _ => match self.determine_unique(descriptor, &survivors)? {
                Some(holder) => {
                    debug!(descriptor = %descriptor, candidate = holder.key(), "仲裁选出候选");
                    Ok(SelectionOutcome::Selected(holder))
                }
                None => {
                    if self.resolver.is_required(descriptor) {
                        Err(SelectionError::AmbiguousDependency {
                            descriptor: descriptor.to_string(),
                            candidate_keys: survivors
                                .iter()
                                .map(|holder| holder.key().to_string())
                                .collect(),
                        })
                    } else {
                        debug!(descriptor = %descriptor, "非必需注入点歧义，跳过注入");
                        Ok(SelectionOutcome::Skipped)
                    }
                }
            },
        }
    }

    /// 在多个幸存候选中仲裁唯一胜者
    ///
    /// 首选标志唯一者直接胜出，多个首选立即判为歧义；无首选时比较
    /// 优先级，唯一最高者胜出，最高值并列判为歧义；仍无结论时以注入
    /// 点依赖名称与候选键、别名匹配兜底。
    fn determine_unique(
        &self,
        descriptor: &DependencyDescriptor,
        survivors: &[CandidateHolder],
    ) -> SelectionResult<Option<CandidateHolder>> {
        let primaries: Vec<&CandidateHolder> = survivors
            .iter()
            .filter(|holder| holder.definition().is_primary())
            .collect();
        match primaries.len() {
            0 => {}
            1 => return Ok(Some(primaries[0].clone())),
            _ => {
                return Err(SelectionError::AmbiguousDependency {
                    descriptor: descriptor.to_string(),
                    candidate_keys: primaries
                        .iter()
                        .map(|holder| holder.key().to_string())
                        .collect(),
                })
            }
        }

        let prioritized: Vec<(i32, &CandidateHolder)> = survivors
            .iter()
            .filter_map(|holder| holder.definition().priority().map(|p| (p, holder)))
            .collect();
        if let Some(highest) = prioritized.iter().map(|(p, _)| *p).max() {
            let winners: Vec<&CandidateHolder> = prioritized
                .iter()
                .filter(|(p, _)| *p == highest)
                .map(|(_, holder)| *holder)
                .collect();
            if winners.len() == 1 {
                return Ok(Some(winners[0].clone()));
            }
            return Err(SelectionError::AmbiguousDependency {
                descriptor: descriptor.to_string(),
                candidate_keys: winners
                    .iter()
                    .map(|holder| holder.key().to_string())
                    .collect(),
            });
        }

        if let Some(name) = descriptor.dependency_name() {
            if let Some(holder) = survivors.iter().find(|holder| holder.matches_key(name)) {
                return Ok(Some(holder.clone()));
            }
        }
        Ok(None)
    }

    /// 候选是否就是提出请求的组件自身
    fn is_self_reference(holder: &CandidateHolder, owner: Option<&str>) -> bool {
        owner.is_some_and(|owner| holder.matches_key(owner))
    }
}
