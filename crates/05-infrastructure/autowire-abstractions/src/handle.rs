//! 延迟依赖解析句柄
//!
//! 句柄在构造时不触碰注册表，首个调用方触发真实解析；解析结果被缓存，
//! 后续调用直接复用。解析失败不缓存，下次访问重试。

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use uuid::Uuid;

use autowire_common::{DependencyDescriptor, DependencyError, DependencyResult};

/// 依赖目标解析源
///
/// 句柄首次访问时的回调入口，由容器侧实现：执行完整的候选筛选与
/// 实例获取，成功返回类型擦除的共享实例。
pub trait DependencyTargetSource: Send + Sync {
    /// 为描述符解析出最终依赖目标
    fn resolve_target(
        &self,
        descriptor: &DependencyDescriptor,
        requesting_key: Option<&str>,
    ) -> DependencyResult<Arc<dyn Any + Send + Sync>>;
}

/// 延迟依赖解析句柄
///
/// 持有描述符快照与解析源，真实解析推迟到首次 [`get`](Self::get)。
/// 多线程并发首次访问时只有一个线程执行解析，其余线程等待并共享结果。
pub struct LazyDependencyHandle {
    /// 句柄标识，用于日志关联
    handle_id: Uuid,
    descriptor: DependencyDescriptor,
    owner: Option<String>,
    target_source: Arc<dyn DependencyTargetSource>,
    target: OnceCell<Arc<dyn Any + Send + Sync>>,
}

impl LazyDependencyHandle {
    /// 创建延迟解析句柄
    ///
    /// 仅保存描述符与解析源，不执行任何解析动作。
    pub fn new(
        descriptor: DependencyDescriptor,
        owner: Option<String>,
        target_source: Arc<dyn DependencyTargetSource>,
    ) -> Self {
        let handle_id = Uuid::new_v4();
        tracing::debug!(
            handle_id = %handle_id,
            descriptor = %descriptor,
            "创建延迟依赖句柄"
        );
        Self {
            handle_id,
            descriptor,
            owner,
            target_source,
            target: OnceCell::new(),
        }
    }

    /// 获取句柄标识
    pub fn handle_id(&self) -> Uuid {
        self.handle_id
    }

    /// 获取描述符快照
    pub fn descriptor(&self) -> &DependencyDescriptor {
        &self.descriptor
    }

    /// 获取声明此注入点的组件键
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// 判断目标是否已解析
    pub fn is_resolved(&self) -> bool {
        self.target.get().is_some()
    }

    /// 获取依赖目标，首次访问触发真实解析
    ///
    /// 解析成功后结果被缓存；解析失败返回错误且不缓存，后续访问重试。
    pub fn get(&self) -> DependencyResult<Arc<dyn Any + Send + Sync>> {
        self.target
            .get_or_try_init(|| {
                tracing::debug!(
                    handle_id = %self.handle_id,
                    descriptor = %self.descriptor,
                    "首次访问延迟句柄，触发目标解析"
                );
                self.target_source
                    .resolve_target(&self.descriptor, self.owner.as_deref())
            })
            .map(Arc::clone)
    }

    /// 获取依赖目标并下转型为具体类型
    ///
    /// 目标实际类型与 `T` 不符时返回 [`DependencyError::TypeMismatch`]。
    pub fn get_typed<T>(&self) -> DependencyResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let target = self.get()?;
        target
            .downcast::<T>()
            .map_err(|_| DependencyError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                actual: self.descriptor.declared_type().to_string(),
            })
    }
}

impl fmt::Debug for LazyDependencyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyDependencyHandle")
            .field("handle_id", &self.handle_id)
            .field("descriptor", &self.descriptor.to_string())
            .field("owner", &self.owner)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
