//! Brochure pages. Plain HTML; all the motion lives in the wall viewer.

use chrono::Datelike;
use v_htmlescape::escape;

use crate::constants::*;
use crate::ticker::CITY_CAPTIONS;

const MENU: [(&str, &str); 3] = [("About", "/about"), ("Services", "/services"), ("Work", "/work")];

const MISSION: &str = "We design brand experiences that feel personal, thoughtful, and authentic, \
whether that's a social-first campaign, an editorial-style shoot, or an amenity kit waiting inside \
a guest room, our goal is always the same: to cultivate community and connection that lasts far \
beyond checkout.";

struct Founder {
    name: &'static str,
    portrait: &'static str,
    bio: [&'static str; 2],
    snapshot_title: &'static str,
    /// (image, alt, lead-in, detail)
    snapshots: &'static [(&'static str, &'static str, &'static str, &'static str)],
}

const FOUNDERS: [Founder; 2] = [
    Founder {
        name: "Megan Dreisbach",
        portrait: "/images/about/megan.png",
        bio: [
            "Megan Dreisbach is a creative director, art director, and designer whose work blends \
strategic clarity with visual storytelling. Split between New York and Mexico City, she approaches \
each project with design-minded curiosity, exploring culture and place to shape narratives that resonate.",
            "With experience spanning global beauty/lifestyle brands and boutique travel experiences, \
she believes powerful visuals come from meticulous detail. They build connection. They shape memory. \
And they reveal beauty in places we don't always think to look, like a ginger finding her fairytale in CDMX.",
        ],
        snapshot_title: "Personality Snapshot...",
        snapshots: &[
            ("/images/about/jacarandas.png", "Jacarandas", "The best time of the year:", "Jacaranda season in Mexico City"),
            ("/images/about/mango.png", "Mango", "A recent rediscovery as an adult:", "Mangos, because location changes everything"),
            ("/images/about/quetzal.png", "Quetzal", "I'm a BIG FAN of:", "Fluid shapes and high-contrast palettes"),
            ("/images/about/galeries.png", "Galleries", "First stop in a new city:", "I start in the galleries."),
        ],
    },
    Founder {
        name: "Danielle Robles",
        portrait: "/images/about/Danielle.png",
        bio: [
            "Danielle Robles is an LA-native creative director, copywriter, and content strategist with \
over 13 years of experience shaping narratives for some of the world's most recognizable brands. \
Coming from a multicultural background, she approaches every story with curiosity about culture, \
identity, and the ways creativity shapes how we see the world.",
            "From developing glossy eBay campaigns to capturing boots-on-the-ground content for New York \
Fashion Week, she believes that the stories worth telling are the ones that bleed authenticity. They \
linger in our minds long after we scroll away. They remind us we're human.",
        ],
        snapshot_title: "A few of my favorite things...",
        snapshots: &[
            ("/images/about/burrito.png", "Burrito", "Favorite thing about L.A.:", "Eating a breakfast burrito on the beach in mid-November"),
            ("/images/about/city.png", "City", "Favorite cities:", "CDMX, Lisbon & Copenhagen"),
            ("/images/about/postit.png", "Postit", "Favourite quote:", ""),
        ],
    },
];

pub fn home() -> String {
    layout(
        "Tiny Suitcase Travel Agency - Coming Soon",
        &format!(
            r#"<section class="hero" data-catalog="{CATALOG_ROUTE}" data-images="{IMAGES_ROUTE}">
  <h1>Tiny Suitcase</h1>
  <p class="tagline">Boutique Travel Agency</p>
  <div class="badge">Coming Soon</div>
</section>"#
        ),
    )
}

pub fn about() -> String {
    let founders: String = FOUNDERS.iter().map(founder_section).collect();

    let captions = CITY_CAPTIONS.join("|");
    layout(
        "About - Tiny Suitcase",
        &format!(
            r#"<section class="mission">
  <h2>Our Mission</h2>
  <p>{}</p>
</section>
{founders}<section class="split-flap" data-captions="{}">
  <p>TINY SUITCASE STUDIOS</p>
  <p>OPERATING FROM</p>
  <p class="caption">MEXICO CITY</p>
</section>"#,
            escape(MISSION),
            escape(&captions)
        ),
    )
}

fn founder_section(founder: &Founder) -> String {
    let snapshots: String = founder
        .snapshots
        .iter()
        .map(|(image, alt, lead, detail)| {
            format!(
                r#"    <figure class="snapshot">
      <img src="{image}" alt="{}">
      <figcaption>{} <strong>{}</strong></figcaption>
    </figure>
"#,
                escape(alt),
                escape(lead),
                escape(detail)
            )
        })
        .collect();

    format!(
        r#"<section class="founder">
  <img src="{}" alt="{}">
  <h2>{}</h2>
  <p>{}</p>
  <p>{}</p>
  <div class="personality">
    <h3>{}</h3>
{snapshots}  </div>
</section>
"#,
        founder.portrait,
        escape(founder.name),
        escape(founder.name),
        escape(founder.bio[0]),
        escape(founder.bio[1]),
        escape(founder.snapshot_title)
    )
}

pub fn services() -> String {
    coming_soon("Services")
}

pub fn work() -> String {
    coming_soon("Work")
}

fn coming_soon(title: &str) -> String {
    layout(
        &format!("{title} - Tiny Suitcase"),
        &format!(
            "<h1 class=\"page-title\">{}</h1>\n<p class=\"body-text\">Coming soon...</p>",
            escape(title)
        ),
    )
}

fn layout(title: &str, body: &str) -> String {
    let menu: String = MENU
        .iter()
        .map(|(label, href)| format!(r#"<a class="menu-link" href="{href}">{}</a>"#, escape(label)))
        .collect::<Vec<_>>()
        .join("\n    ");
    let year = chrono::Utc::now().year();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{}</title>
  <meta name="description" content="Boutique travel agency specializing in personalized experiences for influencers.">
</head>
<body>
<nav class="nav">
  <a class="home-link" href="/">TINY SUITCASE</a>
  <div class="nav-menu-items">
    {menu}
  </div>
</nav>
<main>
{body}
</main>
<footer class="footer">
  <p>&copy; {year} Tiny Suitcase. All rights reserved.</p>
</footer>
</body>
</html>
"#,
        escape(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_carries_nav_and_footer() {
        for page in [home(), about(), services(), work()] {
            assert!(page.contains(r#"href="/about""#));
            assert!(page.contains(r#"href="/services""#));
            assert!(page.contains(r#"href="/work""#));
            assert!(page.contains("Tiny Suitcase. All rights reserved."));
        }
    }

    #[test]
    fn about_escapes_apostrophes() {
        let page = about();
        assert!(page.contains("that&#x27;s a social-first campaign"));
        assert!(page.contains("world&#x27;s most recognizable brands"));
        assert!(!page.contains("that's"));
    }

    #[test]
    fn about_carries_full_bios_and_snapshots() {
        let page = about();
        assert!(page.contains("Danielle Robles"));
        assert!(page.contains("like a ginger finding her fairytale in CDMX."));
        assert!(page.contains("They remind us we&#x27;re human."));
        assert!(page.contains("<h3>Personality Snapshot...</h3>"));
        assert!(page.contains("<h3>A few of my favorite things...</h3>"));
        assert!(page.contains("CDMX, Lisbon &amp; Copenhagen"));
        assert_eq!(page.matches(r#"<figure class="snapshot">"#).count(), 7);
    }
}
