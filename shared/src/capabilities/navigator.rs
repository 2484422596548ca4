use crux_core::capability::{Capability, CapabilityContext};

use crate::navigation::NavigationSignal;

/// Fire-and-forget navigation requests to the shell.
pub struct Navigator<Ev> {
    context: CapabilityContext<NavigationSignal, Ev>,
}

impl<Ev> Capability<Ev> for Navigator<Ev> {
    type Operation = NavigationSignal;
    type MappedSelf<MappedEv> = Navigator<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        Navigator::new(self.context.map_event(f))
    }
}

impl<Ev> Navigator<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<NavigationSignal, Ev>) -> Self {
        Self { context }
    }

    pub fn navigate(&self, signal: NavigationSignal) {
        tracing::debug!(?signal, "navigate");
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(signal).await;
        });
    }
}
