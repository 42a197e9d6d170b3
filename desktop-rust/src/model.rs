#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    FloorSelect,
    RoomList {
        floor: String,
    },
    RoomCheck {
        floor: String,
        room: String,
    },
}

impl Screen {
    /// 一つ前の画面
    pub fn back(&self) -> Screen {
        match self {
            Screen::Home | Screen::FloorSelect => Screen::Home,
            Screen::RoomList { .. } => Screen::FloorSelect,
            Screen::RoomCheck { floor, .. } => Screen::RoomList { floor: floor.clone() },
        }
    }

    pub fn title(&self) -> String {
        match self {
            Screen::Home => "IESLH Building Check".to_string(),
            Screen::FloorSelect => "Select Floor".to_string(),
            Screen::RoomList { floor } => format!("Check Floor {floor}"),
            Screen::RoomCheck { room, .. } => format!("Check Room {room}"),
        }
    }
}

/// メモ入力ダイアログの内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesEditor {
    pub room: String,
    pub item: String,
    pub index: usize,
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub screen: Screen,
    pub notes: Option<NotesEditor>,
    pub popup: Option<Popup>,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_navigation() {
        let room = Screen::RoomCheck { floor: "1".into(), room: "RoomA".into() };
        let list = room.back();
        assert_eq!(list, Screen::RoomList { floor: "1".into() });
        assert_eq!(list.back(), Screen::FloorSelect);
        assert_eq!(Screen::FloorSelect.back(), Screen::Home);
        assert_eq!(Screen::Home.back(), Screen::Home);
    }

    #[test]
    fn test_titles() {
        assert_eq!(Screen::RoomList { floor: "2".into() }.title(), "Check Floor 2");
        assert_eq!(
            Screen::RoomCheck { floor: "2".into(), room: "Lab".into() }.title(),
            "Check Room Lab"
        );
    }
}
