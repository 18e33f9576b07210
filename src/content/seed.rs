//! Built-in starter content.
//!
//! Enough items for a full session in the `gaming`, `sports` and `food`
//! themes at beginner level, plus a few elementary gaming items so level
//! widening has something to find.

use super::bank::MemoryBank;
use crate::domain::{ContentItem, ContentKind, Level};

fn vocab(id: &str, en: &str, es: &str, theme: &str, level: Level, example: (&str, &str)) -> ContentItem {
    ContentItem::new(id, en, es, ContentKind::Vocabulary, theme, level).with_example(example.0, example.1)
}

fn phrase(id: &str, en: &str, es: &str, theme: &str, level: Level) -> ContentItem {
    ContentItem::new(id, en, es, ContentKind::Phrase, theme, level)
}

/// The bank used when no content directory is configured.
pub fn starter_bank() -> MemoryBank {
    let mut items = gaming();
    items.extend(sports());
    items.extend(food());
    MemoryBank::from_items(items)
}

fn gaming() -> Vec<ContentItem> {
    use Level::{Beginner, Elementary};

    vec![
        vocab("gaming-001", "dragon", "dragón", "gaming", Beginner, (
            "The dragon guards the castle.",
            "El dragón protege el castillo.",
        ))
        .with_hint("🐉 Escupe fuego")
        .with_distractors(&["sword", "castle", "shield"], &["espada", "castillo", "escudo"]),
        vocab("gaming-002", "sword", "espada", "gaming", Beginner, (
            "I found a magic sword.",
            "Encontré una espada mágica.",
        )),
        vocab("gaming-003", "level", "nivel", "gaming", Beginner, (
            "This level is very hard.",
            "Este nivel es muy difícil.",
        )),
        vocab("gaming-004", "player", "jugador", "gaming", Beginner, (
            "Every player has three lives.",
            "Cada jugador tiene tres vidas.",
        )),
        vocab("gaming-005", "treasure", "tesoro", "gaming", Beginner, (
            "The treasure is under the bridge.",
            "El tesoro está debajo del puente.",
        )),
        vocab("gaming-006", "castle", "castillo", "gaming", Beginner, (
            "We must reach the castle.",
            "Tenemos que llegar al castillo.",
        )),
        vocab("gaming-007", "shield", "escudo", "gaming", Beginner, (
            "Use your shield now!",
            "¡Usa tu escudo ahora!",
        )),
        vocab("gaming-008", "coin", "moneda", "gaming", Beginner, (
            "Collect every coin in the cave.",
            "Recoge cada moneda de la cueva.",
        )),
        vocab("gaming-009", "hero", "héroe", "gaming", Beginner, (
            "The hero saves the village.",
            "El héroe salva el pueblo.",
        )),
        vocab("gaming-010", "enemy", "enemigo", "gaming", Beginner, (
            "Watch out for the enemy.",
            "Cuidado con el enemigo.",
        )),
        vocab("gaming-011", "map", "mapa", "gaming", Beginner, (
            "Open the map to find the exit.",
            "Abre el mapa para encontrar la salida.",
        )),
        vocab("gaming-012", "team", "equipo", "gaming", Beginner, (
            "Our team won the match.",
            "Nuestro equipo ganó la partida.",
        )),
        phrase("gaming-013", "Game over!", "¡Fin del juego!", "gaming", Beginner)
            .with_distractors(&["Level up!", "Press start!", "New record!"], &[
                "¡Sube de nivel!",
                "¡Pulsa empezar!",
                "¡Nuevo récord!",
            ]),
        phrase("gaming-014", "Let's play together!", "¡Juguemos juntos!", "gaming", Beginner),
        phrase("gaming-015", "I need more coins", "Necesito más monedas", "gaming", Beginner),
        phrase("gaming-016", "You are the winner", "Tú eres el ganador", "gaming", Beginner),
        vocab("gaming-101", "quest", "misión", "gaming", Elementary, (
            "The quest starts in the forest.",
            "La misión empieza en el bosque.",
        )),
        vocab("gaming-102", "power", "poder", "gaming", Elementary, (
            "This potion gives you power.",
            "Esta poción te da poder.",
        )),
        vocab("gaming-103", "boss", "jefe", "gaming", Elementary, (
            "The final boss is a giant.",
            "El jefe final es un gigante.",
        )),
        phrase("gaming-104", "Save your progress", "Guarda tu progreso", "gaming", Elementary),
    ]
}

fn sports() -> Vec<ContentItem> {
    use Level::Beginner;

    vec![
        vocab("sports-001", "ball", "pelota", "sports", Beginner, (
            "Kick the ball to me.",
            "Patea la pelota hacia mí.",
        )),
        vocab("sports-002", "goal", "gol", "sports", Beginner, (
            "What a great goal!",
            "¡Qué gran gol!",
        )),
        vocab("sports-003", "coach", "entrenador", "sports", Beginner, (
            "The coach is very happy.",
            "El entrenador está muy contento.",
        )),
        vocab("sports-004", "race", "carrera", "sports", Beginner, (
            "She won the race.",
            "Ella ganó la carrera.",
        )),
        vocab("sports-005", "field", "campo", "sports", Beginner, (
            "The field is wet today.",
            "El campo está mojado hoy.",
        )),
        vocab("sports-006", "medal", "medalla", "sports", Beginner, (
            "He got a gold medal.",
            "Él consiguió una medalla de oro.",
        )),
        phrase("sports-007", "We are the champions", "Somos los campeones", "sports", Beginner),
        phrase("sports-008", "Pass me the ball", "Pásame la pelota", "sports", Beginner),
    ]
}

fn food() -> Vec<ContentItem> {
    use Level::Beginner;

    vec![
        vocab("food-001", "pizza", "pizza", "food", Beginner, (
            "I like pizza with cheese.",
            "Me gusta la pizza con queso.",
        )),
        vocab("food-002", "apple", "manzana", "food", Beginner, (
            "The apple is red.",
            "La manzana es roja.",
        )),
        vocab("food-003", "bread", "pan", "food", Beginner, (
            "We eat bread every day.",
            "Comemos pan todos los días.",
        )),
        vocab("food-004", "water", "agua", "food", Beginner, (
            "Drink some water, please.",
            "Bebe un poco de agua, por favor.",
        )),
        vocab("food-005", "cake", "pastel", "food", Beginner, (
            "Mom made a chocolate cake.",
            "Mamá hizo un pastel de chocolate.",
        )),
        vocab("food-006", "cheese", "queso", "food", Beginner, (
            "This cheese smells strong.",
            "Este queso huele fuerte.",
        )),
        phrase("food-007", "I am hungry", "Tengo hambre", "food", Beginner),
        phrase("food-008", "The food is delicious", "La comida está deliciosa", "food", Beginner),
    ]
}
