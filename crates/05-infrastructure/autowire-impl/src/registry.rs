//! 内存候选定义注册表

use std::any::TypeId;
use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::info;

use autowire_abstractions::DefinitionRegistry;
use autowire_common::{
    type_markers_of, CandidateDefinition, CandidateHolder, DefinitionError, DefinitionResult,
    NamingConventions, TypeSpec,
};

/// 注册表内部状态
#[derive(Default)]
struct RegistryState {
    /// 键到候选持有者的索引
    definitions: HashMap<String, CandidateHolder>,
    /// 别名到键的索引
    aliases: HashMap<String, String>,
}

/// 内存候选定义注册表
///
/// 以读写锁保护的哈希索引存储候选定义。键在注册表内唯一，别名不得与
/// 任何已有的键或别名冲突；冲突时整体拒绝，不产生部分注册。枚举接口
/// 按键排序，保证结果确定。
#[derive(Default)]
pub struct InMemoryDefinitionRegistry {
    state: RwLock<RegistryState>,
}

impl InMemoryDefinitionRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册候选定义
    pub fn register(&self, holder: CandidateHolder) -> DefinitionResult<()> {
        if !NamingConventions::is_valid_key(holder.key()) {
            return Err(DefinitionError::InvalidKey {
                key: holder.key().to_string(),
            });
        }
        for alias in holder.aliases() {
            if !NamingConventions::is_valid_key(alias) {
                return Err(DefinitionError::InvalidKey { key: alias.clone() });
            }
        }

        let mut state = self.state.write();
        if state.definitions.contains_key(holder.key()) {
            return Err(DefinitionError::DuplicateKey {
                key: holder.key().to_string(),
            });
        }
        if let Some(existing) = state.aliases.get(holder.key()) {
            return Err(DefinitionError::AliasConflict {
                alias: holder.key().to_string(),
                existing_key: existing.clone(),
            });
        }
        for alias in holder.aliases() {
            let conflict = if alias == holder.key() {
                Some(holder.key().to_string())
            } else if state.definitions.contains_key(alias) {
                Some(alias.clone())
            } else {
                state.aliases.get(alias).cloned()
            };
            if let Some(existing_key) = conflict {
                return Err(DefinitionError::AliasConflict {
                    alias: alias.clone(),
                    existing_key,
                });
            }
        }

        let key = holder.key().to_string();
        for alias in holder.aliases() {
            state.aliases.insert(alias.clone(), key.clone());
        }
        info!(
            "注册候选定义: {} ({}), 别名 {} 个",
            key,
            holder.definition().type_spec(),
            holder.aliases().len()
        );
        state.definitions.insert(key, holder);
        Ok(())
    }

    /// 以类型为中心注册候选定义
    ///
    /// 键按命名约定从类型名生成，并合并过程宏为该类型登记的类型级标记。
    pub fn register_type<T: Send + Sync + 'static>(
        &self,
        definition: CandidateDefinition,
    ) -> DefinitionResult<CandidateHolder> {
        let key = NamingConventions::default_key_of::<T>();
        let type_markers = type_markers_of(TypeId::of::<T>());
        let mut definition = definition.with_markers(&type_markers.markers);
        if type_markers.primary {
            definition = definition.as_primary();
        }
        let holder = CandidateHolder::new(key, definition);
        self.register(holder.clone())?;
        Ok(holder)
    }

    /// 已注册候选数量
    pub fn len(&self) -> usize {
        self.state.read().definitions.len()
    }

    /// 是否没有任何候选
    pub fn is_empty(&self) -> bool {
        self.state.read().definitions.is_empty()
    }
}

impl DefinitionRegistry for InMemoryDefinitionRegistry {
    fn candidate(&self, key: &str) -> Option<CandidateHolder> {
        let state = self.state.read();
        if let Some(holder) = state.definitions.get(key) {
            return Some(holder.clone());
        }
        state
            .aliases
            .get(key)
            .and_then(|target| state.definitions.get(target))
            .cloned()
    }

    fn candidate_keys(&self) -> Vec<String> {
        let state = self.state.read();
        let mut keys: Vec<String> = state.definitions.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn candidates_of_type(&self, type_spec: &TypeSpec) -> Vec<CandidateHolder> {
        let state = self.state.read();
        let mut matched: Vec<CandidateHolder> = state
            .definitions
            .values()
            .filter(|holder| {
                type_spec.is_wildcard() || holder.definition().provides_service(type_spec.raw())
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.key().cmp(b.key()));
        matched
    }
}
