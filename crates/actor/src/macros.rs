/// Defines an actor's state type together with a wrapper handle type.
///
/// Doc comments placed before `#[wrapper_type(...)]` document the wrapper;
/// attributes placed after it apply to the state struct. The state struct
/// itself stays private to the defining module, so the only way to touch
/// it is through messages.
///
/// The wrapper gets private `spawn` and `handle` helpers. Add your own
/// `impl` blocks on it to expose a typed API.
#[macro_export]
macro_rules! define_actor {
    {
        $(#[doc = $doc:literal])*
        #[wrapper_type($wrapper_type:ident)]
        $(#[$state_attr:meta])*
        $v:vis struct $state_type:ident {
            $($state_items:tt)*
        }
    } => {
        $(#[$state_attr])*
        struct $state_type {
            $($state_items)*
        }

        $(#[doc = $doc])*
        $v struct $wrapper_type {
            handle: $crate::Actor<$state_type>,
        }

        impl $wrapper_type {
            #[inline]
            #[allow(dead_code)]
            fn spawn(state: $state_type, label: Option<&str>) -> Self {
                Self {
                    handle: $crate::Actor::spawn(state, label),
                }
            }

            #[inline]
            #[allow(dead_code)]
            fn handle(&self) -> &$crate::Actor<$state_type> {
                &self.handle
            }
        }

        impl Clone for $wrapper_type {
            #[inline]
            fn clone(&self) -> Self {
                Self {
                    handle: self.handle.clone(),
                }
            }
        }
    };
    {
        $(#[doc = $doc:literal])*
        $v:vis struct $state_type:ident {
            $($state_items:tt)*
        }
    } => {
        compile_error!("`define_actor!` requires a `#[wrapper_type(...)]` attribute");
    };
}
