//! 绑定生成器抽象接口

use crate::descriptor::BindingDescriptor;
use conventions_common::{CandidateType, GenerationResult};

/// 绑定生成器 trait
///
/// 把单个候选类型映射为零个或多个绑定描述符。
/// 生成器必须是无状态的纯函数：同一候选类型多次调用产出内容一致，
/// 与跨类型的调用顺序无关。对不适用的类型返回空序列不是错误
pub trait BindingGenerator: Send + Sync {
    /// 为候选类型生成绑定描述符
    fn generate(&self, candidate: &CandidateType) -> GenerationResult<Vec<BindingDescriptor>>;

    /// 获取生成器名称
    fn name(&self) -> &str;
}
