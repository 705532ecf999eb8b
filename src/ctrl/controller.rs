//! 事件分发器

use super::event::{FlowRemoved, SwitchEvent};
use super::id::SwitchId;
use super::profile::ProfileTable;
use super::rule::FlowRule;
use super::toggle::{ToggleState, ToggleStore};
use tracing::{debug, info, trace};

/// 响应式流表控制器。
///
/// `Send + Sync`：不同交换机的事件可以在不同线程并行分发，同一交换机的切换状态由
/// [`ToggleStore`] 保证原子读-翻转。
#[derive(Debug, Default)]
pub struct Controller {
    profiles: ProfileTable,
    toggles: ToggleStore,
}

impl Controller {
    pub fn new(profiles: ProfileTable) -> Self {
        Self {
            profiles,
            toggles: ToggleStore::default(),
        }
    }

    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    pub fn toggle_state(&self, id: SwitchId) -> ToggleState {
        self.toggles.get(id)
    }

    pub fn dispatch(&self, ev: &SwitchEvent) -> Vec<FlowRule> {
        match ev {
            SwitchEvent::HandshakeComplete(id) => self.on_handshake_complete(*id),
            SwitchEvent::FlowRemoved(msg) => self.handle_flow_removed(msg),
        }
    }

    /// 握手完成：返回该交换机的握手规则；未配置的交换机返回空。
    #[tracing::instrument(skip(self), fields(switch = %id))]
    pub fn on_handshake_complete(&self, id: SwitchId) -> Vec<FlowRule> {
        match self.profiles.lookup(id) {
            Ok(profile) => {
                info!(rules = profile.handshake().len(), "🤝 握手完成，下发初始规则");
                profile.handshake().to_vec()
            }
            Err(err) => {
                trace!(%err, "忽略");
                Vec::new()
            }
        }
    }

    /// 流表项被删除：对交替型交换机返回当前状态对应的一组规则并翻转状态；其他交换机返回空。
    #[tracing::instrument(skip(self), fields(switch = %id))]
    pub fn on_flow_removed(&self, id: SwitchId) -> Vec<FlowRule> {
        let alt = match self.profiles.lookup(id) {
            Ok(profile) => profile.alternating(),
            Err(err) => {
                trace!(%err, "忽略");
                return Vec::new();
            }
        };
        let Some(alt) = alt else {
            debug!("交换机没有交替规则");
            return Vec::new();
        };
        let state = self.toggles.take_and_flip(id);
        let rules = alt.for_state(state).to_vec();
        info!(
            state = %state,
            next = %state.flipped(),
            rules = rules.len(),
            "🔁 flow-removed，下发交替规则"
        );
        rules
    }

    fn handle_flow_removed(&self, msg: &FlowRemoved) -> Vec<FlowRule> {
        debug!(
            switch = %msg.switch,
            table = msg.table,
            priority = msg.priority,
            matches = ?msg.matches,
            reason = ?msg.reason,
            duration_s = msg.duration_s,
            "收到 flow-removed"
        );
        self.on_flow_removed(msg.switch)
    }
}
