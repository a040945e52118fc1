pub use crate::animation::{
    AnimatedValue, Animation, AnimationGroup, AnimationHandle, AnimationSpec, Easing,
    ForwardingAnimation, Tween,
};
pub use crate::color::Color;
pub use crate::error::{ConfigError, Error, TreeError};
pub use crate::geometry::{Rect, Size, Transform, Transformation, Vec2};
pub use crate::input::{PointerEvent, PointerEventKind, PointerId, PointerKind};
pub use crate::render_api::{Bitmap, DrawingContext, FrameConfig, RenderBackend};
pub use crate::scaling::{ScaleConfig, ScaleRegistry};
pub use crate::scene::{Scene, SceneContext, SceneNode};
pub use crate::signal::{Callback, UpdateSignal};
